use super::*;

fn product(title: &str, price: &str) -> Product {
    Product {
        title: title.into(),
        price: price.into(),
        link: format!("https://shop.example/{title}"),
        image: String::new(),
    }
}

#[test]
fn payload_text_layout() {
    let p = product("hoodie", "¥3,980");
    let post = PostPayload::new("Cozy season", Some(Path::new("out/composed_1.png")), Some(&p));
    assert_eq!(
        post.text,
        "Cozy season\n\nPrice: ¥3,980\nShop: https://shop.example/hoodie"
    );
    assert_eq!(post.image_path, Path::new("out/composed_1.png").display().to_string());
    assert_eq!(post.product, Some(p));

    let bare = PostPayload::new("x", None, None);
    assert_eq!(bare.text, "x\n\nPrice: \nShop: ");
    assert_eq!(bare.image_path, "");
    assert_eq!(bare.product, None);
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "postcraft_assemble_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn images_pair_by_index_and_products_rotate() {
    let captions: Vec<String> = (0..5).map(|i| format!("c{i}")).collect();
    let images = vec![
        Some(PathBuf::from("composed_1.png")),
        None,
        Some(PathBuf::from("composed_3.png")),
    ];
    let products = vec![product("p0", "1"), product("p1", "2"), product("p2", "3")];
    let posts = assemble_posts(&captions, &images, &products);

    assert_eq!(posts.len(), 5);
    let imgs: Vec<_> = posts.iter().map(|p| p.image_path.as_str()).collect();
    assert_eq!(imgs, ["composed_1.png", "", "composed_3.png", "", ""]);
    assert!(posts[2].text.starts_with("c2\n"));
    let titles: Vec<_> = posts
        .iter()
        .map(|p| p.product.as_ref().unwrap().title.as_str())
        .collect();
    assert_eq!(titles, ["p0", "p1", "p2", "p0", "p1"]);
}

#[test]
fn no_images_or_products_still_assembles() {
    let posts = assemble_posts(&["only".to_string()], &[], &[]);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].image_path, "");
    assert!(posts[0].product.is_none());
}

#[test]
fn products_load_from_csv() {
    let dir = temp_dir("csv");
    let file = dir.join("products.csv");
    std::fs::write(
        &file,
        "title,price,link,image\n\
         Heavy hoodie,\"¥3,980\",https://shop.example/hoodie,hoodie.jpg\n\
         Plain tee,1980.50,,\n\
         Cap,,,\n",
    )
    .unwrap();

    let products = load_products(&file).unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(
        products[0],
        Product {
            title: "Heavy hoodie".into(),
            price: "¥3,980".into(),
            link: "https://shop.example/hoodie".into(),
            image: "hoodie.jpg".into(),
        }
    );
    assert_eq!(products[1].price, "1980.50");
    assert_eq!(products[1].link, "");
    assert_eq!(
        products[2],
        Product {
            title: "Cap".into(),
            ..Product::default()
        }
    );

    assert!(load_products(&dir.join("missing.csv")).unwrap().is_empty());

    let ragged = dir.join("ragged.csv");
    std::fs::write(&ragged, "title,price\na,1\nb\n").unwrap();
    assert!(matches!(load_products(&ragged), Err(ComposeError::Serde(_))));
    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn csv_columns_match_by_header() {
    let dir = temp_dir("header");
    let file = dir.join("products.csv");
    std::fs::write(&file, "link,title,stock\nhttps://s/x, Sweat ,4\n").unwrap();
    let products = load_products(&file).unwrap();
    assert_eq!(
        products,
        [Product {
            title: "Sweat".into(),
            link: "https://s/x".into(),
            ..Product::default()
        }]
    );
    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn payloads_written_to_disk() {
    let dir = temp_dir("payloads");
    let products = vec![product("cap", "900")];
    let posts = assemble_posts(&["hi".to_string()], &[Some(PathBuf::from("x.png"))], &products);
    let out = dir.join("data").join(PAYLOAD_FILE_NAME);
    write_payloads(&out, &posts).unwrap();
    let back: Vec<PostPayload> =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(back, posts);
    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn composed_images_follow_caption_indices() {
    let dir = temp_dir("composed");
    for name in ["composed_1.png", "composed_3.png", "composed_10.png", "other.png"] {
        std::fs::write(dir.join(name), b"").unwrap();
    }
    std::fs::create_dir_all(dir.join("composed_2.png")).unwrap();

    let found = composed_images(&dir, 3);
    assert_eq!(
        found,
        [
            Some(dir.join("composed_1.png")),
            None,
            Some(dir.join("composed_3.png")),
        ]
    );
    assert!(composed_images(&dir, 0).is_empty());
    let absent = composed_images(&dir.join("nope"), 2);
    assert_eq!(absent.len(), 2);
    assert!(absent.iter().all(Option::is_none));
    std::fs::remove_dir_all(dir).ok();
}
