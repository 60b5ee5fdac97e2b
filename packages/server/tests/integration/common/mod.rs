use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use reqwest::Client;
use reqwest::header::HeaderMap;
use reqwest::multipart::{Form, Part};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::Value;
use tempfile::TempDir;

use catalog_common::storage::FilesystemFileStore;
use catalog_server::config::{
    AppConfig, CorsConfig, DatabaseConfig, ServerConfig, StorageConfig,
};
use catalog_server::entity::{image, product};
use catalog_server::state::AppState;

pub mod routes {
    pub const PRODUCTS: &str = "/products/";

    pub fn file(filename: &str) -> String {
        format!("/files/{filename}")
    }
}

/// A running test server backed by a SQLite file and an upload directory
/// inside `root`.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    pub upload_dir: PathBuf,
    _dir: Option<TempDir>,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Raw response body.
    pub bytes: Vec<u8>,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    /// Spawn a server with a fresh temporary database and upload directory.
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut app = Self::spawn_in(dir.path()).await;
        app._dir = Some(dir);
        app
    }

    /// Spawn a server whose state lives under `root`. Spawning twice on the
    /// same root simulates a process restart.
    pub async fn spawn_in(root: &Path) -> Self {
        let upload_dir = root.join("uploaded_files");
        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                public_url: None,
                cors: CorsConfig::default(),
            },
            database: DatabaseConfig {
                url: format!("sqlite://{}?mode=rwc", root.join("catalog.db").display()),
                max_connections: 5,
            },
            storage: StorageConfig {
                upload_dir: upload_dir.clone(),
                max_file_size: 1024 * 1024,
                max_upload_size: 4 * 1024 * 1024,
            },
        };

        let db = catalog_server::database::init_db(&app_config.database)
            .await
            .expect("Failed to initialize database");
        let store = FilesystemFileStore::new(upload_dir.clone(), app_config.storage.max_file_size)
            .await
            .expect("Failed to create file store");

        let state = AppState {
            db: db.clone(),
            store: Arc::new(store),
            config: app_config,
        };

        let app = catalog_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
            upload_dir,
            _dir: None,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_form(&self, path: &str, form: Form) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart request");

        TestResponse::from_response(res).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.get_url(&self.url(path)).await
    }

    pub async fn get_url(&self, url: &str) -> TestResponse {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    /// Create a product via the API with the given files.
    pub async fn create_product(
        &self,
        name: &str,
        price: &str,
        files: &[(&str, &[u8])],
    ) -> TestResponse {
        let form = files.iter().fold(
            Form::new()
                .text("name", name.to_string())
                .text("price", price.to_string()),
            |form, (filename, data)| form.part("files", file_part(filename, data)),
        );
        self.post_form(routes::PRODUCTS, form).await
    }

    pub async fn product_count(&self) -> u64 {
        product::Entity::find()
            .count(&self.db)
            .await
            .expect("DB query failed")
    }

    pub async fn image_count(&self) -> u64 {
        image::Entity::find()
            .count(&self.db)
            .await
            .expect("DB query failed")
    }

    /// Number of entries left in the store's staging area.
    pub fn staged_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir.join(".staging"))
            .expect("staging directory should exist")
            .count()
    }
}

pub fn file_part(filename: &str, data: &[u8]) -> Part {
    Part::bytes(data.to_vec())
        .file_name(filename.to_string())
        .mime_str("image/jpeg")
        .expect("Failed to set MIME type")
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let bytes = res.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Self {
            status,
            headers,
            bytes,
            body,
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    pub fn id(&self) -> i32 {
        self.body["id"]
            .as_i64()
            .expect("response body should contain 'id'") as i32
    }

    pub fn images(&self) -> Vec<String> {
        self.body["images"]
            .as_array()
            .expect("response body should contain 'images'")
            .iter()
            .map(|v| v.as_str().expect("image URL should be a string").to_string())
            .collect()
    }

    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .unwrap_or_else(|| panic!("missing header {name}"))
            .to_str()
            .expect("header should be ASCII")
    }
}
