//! Translation of keyword searches into MongoDB filters.
//!
//! The keyword is escaped so that it matches literally; MongoDB's case-insensitive
//! `$regex` then performs the substring test server-side.

use bson::{Document, doc};

use bookstore_core::query::SearchQuery;

pub(crate) struct MongoSearchTranslator;

impl MongoSearchTranslator {
    /// Builds `{ "$or": [{ <field>: { "$regex": <keyword>, "$options": "i" } }, ...] }`.
    pub(crate) fn translate(query: &SearchQuery) -> Document {
        let pattern = regex::escape(query.keyword());

        doc! {
            "$or": query
                .fields()
                .iter()
                .map(|field| doc! {
                    field.name(): { "$regex": pattern.as_str(), "$options": "i" },
                })
                .collect::<Vec<_>>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use bookstore_core::query::SearchField;

    use super::*;

    #[test]
    fn ors_case_insensitive_regex_over_title_and_description() {
        let filter = MongoSearchTranslator::translate(&SearchQuery::new("Gatsby").unwrap());

        assert_eq!(
            filter,
            doc! {
                "$or": [
                    { "title": { "$regex": "gatsby", "$options": "i" } },
                    { "description": { "$regex": "gatsby", "$options": "i" } },
                ]
            }
        );
    }

    #[test]
    fn regex_metacharacters_are_escaped() {
        let query = SearchQuery::with_fields("c++ (2nd ed.)", [SearchField::Title]).unwrap();

        let filter = MongoSearchTranslator::translate(&query);

        assert_eq!(
            filter,
            doc! {
                "$or": [
                    { "title": { "$regex": r"c\+\+ \(2nd ed\.\)", "$options": "i" } },
                ]
            }
        );
    }
}
