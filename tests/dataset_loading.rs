// Loading datasets from disk through the configured paths.
use eventhub::config::Config;
use eventhub::context::{AppContext, TestContext};
use eventhub::error::LoadError;
use eventhub::model::PriceClass;
use eventhub::source::{FileSource, ItemSource};
use std::fs;

const JSON_EVENTS: &str = r#"[
    {"name": "Rust Conf", "start_date": "2030-09-01", "end_date": "2030-09-03",
     "location": "Montreal", "free_or_paid": "paid", "organization_url": "https://rust.example",
     "logo": "rust.png", "featured": true, "lat": 45.5, "lng": -73.6},
    {"name": "No Dates", "location": "Nowhere"},
    "not a record",
    {"title": "Hack Night", "date": "2030-10-10", "location": "Lyon", "free_or_paid": "free",
     "lat": "45.7", "lng": 4.8}
]"#;

const YAML_EVENTS: &str = "\
events:
  - name: Harbour Festival
    start_date: 2030-07-01
    end_date: 2030-07-04
    location: Hamburg
    free_or_paid: free
    region: EU
    featured: true
    lat: 53.5
    lng: 9.9
  - name: Missing End
    start_date: someday
";

#[tokio::test]
async fn json_dataset_keeps_valid_records_in_order() {
    let ctx = TestContext::new();
    let path = ctx.get_data_dir().unwrap().join("events.json");
    fs::write(&path, JSON_EVENTS).unwrap();

    let items = FileSource::new(&path).load_items().await.unwrap();
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Rust Conf", "Hack Night"]);

    assert_eq!(items[0].price, PriceClass::Paid);
    assert!(items[0].has_coordinates());
    // String latitude is not a coordinate.
    assert!(!items[1].has_coordinates());
    assert_eq!(items[1].start_date, items[1].end_date);
    assert_eq!(items[1].price, PriceClass::Free);
}

#[tokio::test]
async fn yaml_dataset_from_configured_path() {
    let ctx = TestContext::new();
    let cfg = Config {
        data_file: Some("festivals.yml".into()),
        ..Config::default()
    };
    let path = cfg.data_path(&ctx, None).unwrap();
    fs::write(&path, YAML_EVENTS).unwrap();

    let items = FileSource::new(path).load_items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Harbour Festival");
    assert_eq!(items[0].region.as_deref(), Some("EU"));
    assert!(items[0].featured);
}

#[tokio::test]
async fn default_dataset_path_comes_from_the_context() {
    let ctx = TestContext::new();
    let path = Config::default().data_path(&ctx, None).unwrap();
    assert_eq!(path, ctx.get_data_dir().unwrap().join("events.json"));

    match FileSource::new(&path).load_items().await {
        Err(LoadError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an io error, got {:?}", other),
    }
}

#[tokio::test]
async fn unsupported_and_malformed_documents_fail_the_load() {
    let ctx = TestContext::new();
    let dir = ctx.get_data_dir().unwrap();

    let csv = dir.join("events.csv");
    fs::write(&csv, "name,date\n").unwrap();
    assert!(matches!(
        FileSource::new(&csv).load_items().await,
        Err(LoadError::Unsupported(_))
    ));

    let broken = dir.join("broken.json");
    fs::write(&broken, "[{\"name\": ").unwrap();
    assert!(matches!(
        FileSource::new(&broken).load_items().await,
        Err(LoadError::Parse(_))
    ));

    let scalar = dir.join("scalar.yaml");
    fs::write(&scalar, "42\n").unwrap();
    assert!(matches!(
        FileSource::new(&scalar).load_items().await,
        Err(LoadError::Parse(_))
    ));
}

#[test]
fn command_line_path_wins_over_config() {
    let ctx = TestContext::new();
    let cfg = Config {
        data_file: Some("/srv/events.json".into()),
        ..Config::default()
    };
    let chosen = cfg
        .data_path(&ctx, Some(std::path::Path::new("local.yaml")))
        .unwrap();
    assert_eq!(chosen, std::path::PathBuf::from("local.yaml"));
}
