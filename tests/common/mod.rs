//! MongoDB test container for the integration tests.
//!
//! These tests need a Docker daemon, so they are `#[ignore]`d by default:
//! run them with `cargo test -- --ignored`.

#![allow(dead_code)]

use mongodb::bson::Document;
use mongodb::{Client, Collection};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

/// A running MongoDB 7.0 container with a per-test database suffix.
pub struct MongoTestContainer {
    pub client: Client,
    pub connection_string: String,
    test_id: String,
    _container: ContainerAsync<Mongo>,
}

impl MongoTestContainer {
    pub async fn start() -> Self {
        let container = Mongo::default()
            .with_tag("7.0")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get port");
        let connection_string = format!("mongodb://{}:{}", host, port);

        let client = nosql::db_mongo::create_client(&connection_string)
            .await
            .expect("Failed to connect to MongoDB container");

        let test_id = uuid::Uuid::new_v4().to_string()[..8].to_string();

        Self {
            client,
            connection_string,
            test_id,
            _container: container,
        }
    }

    pub fn db_name(&self, name: &str) -> String {
        format!("{}_{}", name, self.test_id)
    }

    pub fn collection(&self, db: &str, collection: &str) -> Collection<Document> {
        let db = nosql::db_mongo::get_database(&self.client, &self.db_name(db));
        nosql::db_mongo::get_collection(&db, collection)
    }
}
