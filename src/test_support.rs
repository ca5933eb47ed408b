//! Stand-in legacy primitives for tests

use std::sync::Arc;

use sha2::{Digest, Sha512};

use crate::legacy::{Hash512, LegacyStage, PrimitiveRegistry, RegistryBuilder};

/// SHA-512 over `tag || data`, distinct per tag
pub(crate) struct TaggedSha512(pub &'static str);

impl Hash512 for TaggedSha512 {
    fn name(&self) -> &str {
        self.0
    }

    fn hash(&self, data: &[u8]) -> [u8; 64] {
        let mut hasher = Sha512::new();
        hasher.update(self.0.as_bytes());
        hasher.update(data);
        let mut out = [0u8; 64];
        out.copy_from_slice(&hasher.finalize());
        out
    }
}

/// Builder with every stage bound to a stand-in tagged by the stage name
pub(crate) fn tagged_registry() -> RegistryBuilder {
    LegacyStage::ORDER
        .into_iter()
        .fold(PrimitiveRegistry::builder(), |builder, stage| {
            builder.register(stage, Arc::new(TaggedSha512(stage.name())))
        })
}
