use mongodb::bson::{Bson, Document, doc, oid::ObjectId};
use tokio::sync::Mutex;

use super::handle::{CollectionHandle, UpdateSummary};
use crate::error::{Error, Result};

/// In-process stand-in for a MongoDB collection.
///
/// Understands the same `{field: value}` filters the helpers issue and keeps
/// documents in insertion order. Query operators are rejected.
#[derive(Debug, Default)]
pub struct MemoryCollection {
    documents: Mutex<Vec<Document>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection, assigning an `ObjectId` to documents without `_id`
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Result<Self> {
        let mut stored: Vec<Document> = Vec::new();
        for document in documents {
            let (_, document) = with_id(document, &stored)?;
            stored.push(document);
        }

        Ok(Self {
            documents: Mutex::new(stored),
        })
    }

    pub async fn len(&self) -> usize {
        self.documents.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.lock().await.is_empty()
    }
}

impl CollectionHandle for MemoryCollection {
    async fn insert_document(&self, document: Document) -> Result<Bson> {
        let mut documents = self.documents.lock().await;
        let (id, document) = with_id(document, &documents)?;
        documents.push(document);
        Ok(id)
    }

    async fn find_documents(&self, filter: Document) -> Result<Vec<Document>> {
        check_filter(&filter)?;
        let documents = self.documents.lock().await;

        Ok(documents
            .iter()
            .filter(|document| matches(document, &filter))
            .cloned()
            .collect())
    }

    async fn update_documents(&self, filter: Document, set: Document) -> Result<UpdateSummary> {
        check_filter(&filter)?;
        if set.contains_key("_id") {
            return Err(Error::UnsupportedFilter(
                "the immutable field `_id` cannot be updated".to_string(),
            ));
        }

        let mut documents = self.documents.lock().await;
        let mut summary = UpdateSummary::default();

        for document in documents.iter_mut().filter(|d| matches(d, &filter)) {
            summary.matched += 1;

            let mut changed = false;
            for (field, value) in &set {
                if document.get(field) != Some(value) {
                    document.insert(field.clone(), value.clone());
                    changed = true;
                }
            }
            if changed {
                summary.modified += 1;
            }
        }

        Ok(summary)
    }

    async fn count_matching(&self, filter: Document) -> Result<u64> {
        check_filter(&filter)?;
        let documents = self.documents.lock().await;
        Ok(documents.iter().filter(|d| matches(d, &filter)).count() as u64)
    }
}

// `_id` goes first, as the server stores it.
fn with_id(document: Document, existing: &[Document]) -> Result<(Bson, Document)> {
    let id = document
        .get("_id")
        .cloned()
        .unwrap_or_else(|| Bson::ObjectId(ObjectId::new()));

    if existing.iter().any(|d| d.get("_id") == Some(&id)) {
        return Err(Error::DuplicateKey(id.to_string()));
    }

    let mut stored = doc! { "_id": id.clone() };
    for (field, value) in document {
        if field != "_id" {
            stored.insert(field, value);
        }
    }

    Ok((id, stored))
}

fn check_filter(filter: &Document) -> Result<()> {
    for (field, value) in filter {
        if field.starts_with('$') {
            return Err(Error::UnsupportedFilter(format!("operator `{field}`")));
        }
        if let Bson::Document(inner) = value {
            if let Some(op) = inner.keys().find(|k| k.starts_with('$')) {
                return Err(Error::UnsupportedFilter(format!("operator `{op}` on `{field}`")));
            }
        }
    }
    Ok(())
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(field, expected)| field_matches(document.get(field), expected))
}

fn field_matches(actual: Option<&Bson>, expected: &Bson) -> bool {
    match actual {
        // A missing field only matches an explicit null
        None => matches!(expected, Bson::Null),
        Some(Bson::Array(items)) => {
            matches!(expected, Bson::Array(whole) if whole == items)
                || items.iter().any(|item| values_equal(item, expected))
        }
        Some(value) => values_equal(value, expected),
    }
}

fn values_equal(left: &Bson, right: &Bson) -> bool {
    match (as_number(left), as_number(right)) {
        (Some(l), Some(r)) => l == r,
        _ => left == right,
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}
