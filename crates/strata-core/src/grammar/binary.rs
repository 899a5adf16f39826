//! Binary serialization for grammar definitions using postcard.

use super::json::DefinitionError;
use super::types::GrammarDef;

impl GrammarDef {
    /// Deserialize a definition from binary format.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, DefinitionError> {
        postcard::from_bytes(bytes).map_err(DefinitionError::Binary)
    }

    /// Serialize a definition to binary format.
    pub fn to_binary(&self) -> Result<Vec<u8>, DefinitionError> {
        postcard::to_allocvec(self).map_err(DefinitionError::Binary)
    }
}
