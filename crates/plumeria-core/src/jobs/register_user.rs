//! User registration.

use crate::access::{assert_privilege, resolve_threshold, Privilege};
use crate::args::{ARG_NEW_ACCESS_RANK, ARG_NEW_EMAIL, ARG_NEW_PASSWORD, ARG_NEW_USER_NAME};
use crate::job::{Job, JobContext, JobOutcome};
use crate::mail::confirmation_mail;
use crate::requirements::Requirement;
use async_trait::async_trait;
use plumeria_auth::hash_password;
use plumeria_commons::{AccessRank, ApiError, ApiResult, User, UserName};
use plumeria_system::UsersProvider;
use std::collections::BTreeMap;

/// Registers a new account.
///
/// The very first user in the system is created as Admin regardless of
/// the request; the count check runs in the same transaction as the
/// insert, so two racing first registrations cannot both win. Every
/// later user defaults to Registered; any other requested rank needs the
/// rank-grant sub-privilege and fails rather than silently downgrading.
pub struct RegisterUserJob;

impl RegisterUserJob {
    pub const TYPE: &'static str = "register-user";
}

#[async_trait]
impl Job for RegisterUserJob {
    fn name(&self) -> &'static str {
        Self::TYPE
    }

    fn required_arguments(&self) -> Requirement {
        Requirement::conjunction([ARG_NEW_USER_NAME, ARG_NEW_PASSWORD])
    }

    fn required_main_privilege(&self) -> Option<Privilege> {
        Some(Privilege::register_account())
    }

    async fn execute(&self, ctx: &mut JobContext<'_>) -> ApiResult<JobOutcome> {
        let name = UserName::new(ctx.require_str(ARG_NEW_USER_NAME)?);
        let password = ctx.require_str(ARG_NEW_PASSWORD)?.to_string();

        if name.is_empty() {
            return Err(ApiError::policy("User name cannot be empty"));
        }

        if UsersProvider::find_by_name(ctx.tx(), &name)?.is_some() {
            return Err(ApiError::DuplicateName(name.to_string()));
        }

        let min_length = ctx.config().registration.pass_min_length;
        if password.chars().count() < min_length {
            return Err(ApiError::policy(format!(
                "Password must have at least {} characters",
                min_length
            )));
        }

        // Part of the same transaction as the insert below.
        let first_user = UsersProvider::count(ctx.tx())? == 0;

        let rank = resolve_rank(ctx, first_user)?;

        let (confirmed_email, unconfirmed_email) =
            assign_email(ctx, &name, rank)?;

        let password_hash = hash_password(&password).await?;
        let now = chrono::Utc::now().timestamp_millis();
        let user = User {
            user_id: UsersProvider::next_id(ctx.tx_mut())?,
            name: name.clone(),
            password_hash,
            rank,
            confirmed_email,
            unconfirmed_email,
            created_at: now,
            updated_at: now,
        };
        UsersProvider::create(ctx.tx_mut(), &user)?;

        ctx.record(
            "{user} registered {subject}",
            BTreeMap::from([("subject".to_string(), name.to_string())]),
        );

        JobOutcome::from_value(&user)
    }
}

/// Resolves the new user's access rank.
fn resolve_rank(ctx: &JobContext<'_>, first_user: bool) -> ApiResult<AccessRank> {
    if first_user {
        return Ok(AccessRank::Admin);
    }

    let Some(requested) = ctx.args().get_str(ARG_NEW_ACCESS_RANK) else {
        return Ok(AccessRank::Registered);
    };
    let rank = AccessRank::from_name(requested)
        .ok_or_else(|| ApiError::policy(format!("Invalid access rank '{}'", requested)))?;

    if rank != AccessRank::Registered {
        // Granting any non-default rank needs the scoped sub-privilege.
        let privilege = Privilege::register_account().sub("rank");
        assert_privilege(ctx.config(), ctx.auth(), &privilege)?;
    }
    Ok(rank)
}

/// Applies the e-mail confirmation policy.
///
/// Returns (confirmed, unconfirmed); at most one is set. When the
/// confirmation flow is enabled, the skip policy is resolved for the
/// *new user's own* rank: a rank that passes gets the address confirmed
/// outright, anyone else gets it stored unconfirmed plus exactly one
/// confirmation mail. Only confirmed addresses are unique; two users
/// may hold the same unconfirmed address while the confirmation race is
/// still open.
fn assign_email(
    ctx: &mut JobContext<'_>,
    name: &UserName,
    rank: AccessRank,
) -> ApiResult<(Option<String>, Option<String>)> {
    let email = match ctx.args().get_str(ARG_NEW_EMAIL) {
        Some(e) if !e.trim().is_empty() => e.to_string(),
        _ => return Ok((None, None)),
    };

    if UsersProvider::find_by_confirmed_email(ctx.tx(), &email)?.is_some() {
        return Err(ApiError::DuplicateEmail(email));
    }

    if !ctx.config().registration.need_email_for_registering {
        // Confirmation flow disabled: the address is taken at face
        // value.
        return Ok((Some(email), None));
    }

    let skip_policy =
        resolve_threshold(ctx.config(), &Privilege::edit_user_email_no_confirm());
    if skip_policy.allows(rank) {
        Ok((Some(email), None))
    } else {
        ctx.queue_mail(confirmation_mail(name, &email));
        Ok((None, Some(email)))
    }
}
