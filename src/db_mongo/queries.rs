use mongodb::bson::{Bson, Document, doc};

use super::handle::CollectionHandle;
use crate::error::Result;

/// Insert one school built from the caller's fields, returning its `_id`
pub async fn insert_school<C: CollectionHandle>(collection: &C, fields: Document) -> Result<Bson> {
    let id = collection.insert_document(fields).await?;
    tracing::debug!("Inserted school document {}", id);
    Ok(id)
}

/// List every document in the collection; no collection means no documents
pub async fn list_all<C: CollectionHandle>(collection: Option<&C>) -> Result<Vec<Document>> {
    let Some(collection) = collection else {
        return Ok(Vec::new());
    };

    let documents = collection.find_documents(doc! {}).await?;
    tracing::debug!("Listed {} documents", documents.len());
    Ok(documents)
}

/// Schools whose `topics` array contains `topic`
pub async fn schools_by_topic<C: CollectionHandle>(
    collection: &C,
    topic: &str,
) -> Result<Vec<Document>> {
    let schools = collection
        .find_documents(doc! { "topics": topic })
        .await?;

    tracing::debug!("Found {} schools with topic {:?}", schools.len(), topic);
    Ok(schools)
}

/// Replace the `topics` of every school named `name`
pub async fn update_topics<C: CollectionHandle>(
    collection: &C,
    name: &str,
    topics: &[String],
) -> Result<()> {
    let summary = collection
        .update_documents(doc! { "name": name }, doc! { "topics": topics.to_vec() })
        .await?;

    tracing::debug!(
        "Updated topics for {:?}: matched {}, modified {}",
        name,
        summary.matched,
        summary.modified
    );

    Ok(())
}
