use catalog_server::catalog;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn products_survive_restart() {
    let root = tempfile::tempdir().unwrap();

    let (id, url) = {
        let app = TestApp::spawn_in(root.path()).await;
        let res = app
            .create_product("Durable", "5.5", &[("keep.jpg", b"KEEP".as_slice())])
            .await;
        assert_eq!(res.status, 201, "{}", res.text());
        (res.id(), routes::file("keep.jpg"))
    };

    let app = TestApp::spawn_in(root.path()).await;

    let product = catalog::find_product(&app.db, id)
        .await
        .unwrap()
        .expect("product should be persisted");
    assert_eq!(product.name, "Durable");
    assert_eq!(product.price, 5.5);

    let images = catalog::list_images(&app.db, id).await.unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].filename, "keep.jpg");

    let res = app.get(&url).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.bytes, b"KEEP");
}

#[tokio::test]
async fn ids_keep_increasing_after_restart() {
    let root = tempfile::tempdir().unwrap();

    let first = {
        let app = TestApp::spawn_in(root.path()).await;
        app.create_product("One", "1", &[("one.jpg", b"1".as_slice())])
            .await
            .id()
    };

    let app = TestApp::spawn_in(root.path()).await;
    let second = app
        .create_product("Two", "2", &[("two.jpg", b"2".as_slice())])
        .await
        .id();

    assert!(second > first);
    assert_eq!(app.product_count().await, 2);
    assert_eq!(app.image_count().await, 2);
}
