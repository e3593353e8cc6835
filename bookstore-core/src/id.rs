//! Identifier generation shared by every backend.
//!
//! Backends call an [`IdGenerator`] when a book is created without an identifier.
//! The default, [`ObjectIdGenerator`], produces 24 hex digit ObjectIds, so a book
//! created through the file backend carries an identifier that the MongoDB backend
//! would also accept.

use std::{fmt::Debug, sync::Arc};

use bson::oid::ObjectId;

use crate::book::BookId;

/// Produces fresh, collision-free book identifiers.
pub trait IdGenerator: Send + Sync + Debug {
    fn generate(&self) -> BookId;
}

impl<G: IdGenerator + ?Sized> IdGenerator for Arc<G> {
    fn generate(&self) -> BookId {
        (**self).generate()
    }
}

/// Generates identifiers from new ObjectIds (timestamp, process-unique value and counter).
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectIdGenerator;

impl IdGenerator for ObjectIdGenerator {
    fn generate(&self) -> BookId {
        BookId::from(ObjectId::new())
    }
}

/// The generator used by backend builders unless one is supplied.
pub fn default_generator() -> Arc<dyn IdGenerator> {
    Arc::new(ObjectIdGenerator)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_ids_are_unique_object_ids() {
        let generator = default_generator();
        let ids = (0..1000)
            .map(|_| generator.generate())
            .collect::<HashSet<_>>();

        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.to_object_id().is_ok()));
    }
}
