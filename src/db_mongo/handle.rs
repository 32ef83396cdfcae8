use mongodb::{
    Collection,
    bson::{Bson, Document, doc},
};

use crate::error::Result;

/// Outcome of a multi-document update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub matched: u64,
    pub modified: u64,
}

/// The four store primitives every helper is written against.
///
/// Filters are plain `{field: value}` documents: equality on scalar fields,
/// membership on array fields, several keys meaning AND.
#[allow(async_fn_in_trait)]
pub trait CollectionHandle {
    /// Insert one document and return the id the store assigned to it
    async fn insert_document(&self, document: Document) -> Result<Bson>;

    /// Every document matching `filter`, in the store's natural order
    async fn find_documents(&self, filter: Document) -> Result<Vec<Document>>;

    /// Overwrite the fields in `set` on every document matching `filter`
    async fn update_documents(&self, filter: Document, set: Document) -> Result<UpdateSummary>;

    async fn count_matching(&self, filter: Document) -> Result<u64>;
}

impl CollectionHandle for Collection<Document> {
    async fn insert_document(&self, document: Document) -> Result<Bson> {
        let result = Collection::insert_one(self, document).await?;
        Ok(result.inserted_id)
    }

    async fn find_documents(&self, filter: Document) -> Result<Vec<Document>> {
        let mut cursor = Collection::find(self, filter).await?;

        let mut documents = Vec::new();
        while cursor.advance().await? {
            documents.push(cursor.deserialize_current()?);
        }

        Ok(documents)
    }

    async fn update_documents(&self, filter: Document, set: Document) -> Result<UpdateSummary> {
        let result = Collection::update_many(self, filter, doc! { "$set": set }).await?;

        Ok(UpdateSummary {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn count_matching(&self, filter: Document) -> Result<u64> {
        Ok(Collection::count_documents(self, filter).await?)
    }
}
