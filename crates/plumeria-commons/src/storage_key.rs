/// Conversion between typed keys and their storage representation.
///
/// Implemented by the identifier newtypes so that stores can index
/// entities without ever handling raw strings.
pub trait StorageKey {
    /// Encodes the key into the byte form used by the storage layer.
    fn storage_key(&self) -> Vec<u8>;

    /// Decodes a key from its storage byte form.
    fn from_storage_key(bytes: &[u8]) -> Result<Self, String>
    where
        Self: Sized;
}
