#![cfg(feature = "image")]

use blobtree::formats::{IMAGE_JPEG, IMAGE_PNG};
use blobtree::{Array, DType, Node, Options, Registry, TypeTag};

fn gradient(height: u64, width: u64, channels: u64) -> Array {
    let data = (0..height * width * channels)
        .map(|i| (i % 251) as u8)
        .collect();
    Array::new(TypeTag::native(DType::U8), vec![height, width, channels], data).unwrap()
}

#[test]
fn png_through_registry() {
    let registry = Registry::standard();
    let image = Node::Array(gradient(6, 4, 3));
    let bytes = registry.encode(IMAGE_PNG, &image, &Options::new()).unwrap();
    assert_eq!(registry.decode(IMAGE_PNG, &bytes, &Options::new()).unwrap(), image);
}

#[test]
fn jpeg_quality_changes_output() {
    let registry = Registry::standard();
    let image = Node::Array(gradient(32, 32, 3));
    let high = registry
        .encode(IMAGE_JPEG, &image, &Options::new())
        .unwrap();
    let low = registry
        .encode(IMAGE_JPEG, &image, &Options::new().with("quality", 10i64))
        .unwrap();
    assert!(low.len() < high.len());

    let back = registry.decode(IMAGE_JPEG, &low, &Options::new()).unwrap();
    assert_eq!(back.as_array().unwrap().shape(), &[32, 32, 3]);
}

#[test]
fn tree_of_encoded_images() {
    // thumbnails stored as PNG bytes inside a tree next to their labels
    let registry = Registry::standard();
    let thumbs: Vec<Node> = (1..=3)
        .map(|n| {
            let png = registry
                .encode(IMAGE_PNG, &Node::Array(gradient(n, n, 1)), &Options::new())
                .unwrap();
            Node::Object(vec![
                ("label".into(), Node::Int(n as i64)),
                ("png".into(), Node::Bytes(png)),
            ])
        })
        .collect();
    let tree = Node::Object(vec![("thumbs".into(), Node::List(thumbs))]);

    let bytes = registry.encode("tree", &tree, &Options::new()).unwrap();
    let back = registry.decode("tree", &bytes, &Options::new()).unwrap();
    let png = back.get("thumbs").unwrap().as_list().unwrap()[2]
        .get("png")
        .unwrap()
        .as_bytes()
        .unwrap();
    let pixels = registry.decode(IMAGE_PNG, png, &Options::new()).unwrap();
    assert_eq!(pixels.as_array().unwrap().shape(), &[3, 3]);
}
