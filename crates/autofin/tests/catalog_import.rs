use autofin::catalog::{CatalogError, VehicleCatalog};
use autofin::financing::FinancingError;

#[test]
fn loads_json_inventory_from_disk() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/dealer_inventory.json");

    let catalog = VehicleCatalog::from_path(path).expect("json catalog loads");

    assert_eq!(catalog.len(), 2);
    let bz4x = catalog.get("bz4x-2024").expect("bz4x listed");
    assert_eq!(bz4x.base_price, 43_070.0);
    assert_eq!(bz4x.display_name(), "2024 bZ4X XLE");
    assert!(catalog
        .get("grand-highlander-2024")
        .expect("grand highlander listed")
        .price_source
        .is_none());
}

#[test]
fn loads_bundled_csv_from_disk() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/vehicles.csv");

    let from_disk = VehicleCatalog::from_path(path).expect("csv catalog loads");

    assert_eq!(from_disk, VehicleCatalog::standard().expect("bundled catalog loads"));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = VehicleCatalog::from_path("does/not/exist.csv").expect_err("missing file");

    assert!(matches!(err, CatalogError::Io(_)));
}

#[test]
fn invalid_price_reports_row() {
    let csv = "id,name,model,year,base_price,category,price_source\n\
corolla-2023,Corolla,LE,2023,21550,Sedan,World Toyota\n\
camry-2023,Camry,LE,2023,0,Sedan,\n";

    let err = VehicleCatalog::from_csv_reader(csv.as_bytes()).expect_err("zero price rejected");

    match err {
        CatalogError::InvalidRow { row, source } => {
            assert_eq!(row, 2);
            assert!(matches!(source, FinancingError::InvalidVehicle { id, .. } if id == "camry-2023"));
        }
        other => panic!("expected invalid row, got {other:?}"),
    }
}

#[test]
fn duplicate_ids_are_rejected() {
    let csv = "id,name,model,year,base_price,category,price_source\n\
rav4-2024,RAV4,Base,2024,28675,SUV,\n\
rav4-2024,RAV4,XLE,2024,31380,SUV,\n";

    let err = VehicleCatalog::from_csv_reader(csv.as_bytes()).expect_err("duplicate rejected");

    assert!(matches!(err, CatalogError::DuplicateId { row: 2, ref id } if id == "rav4-2024"));
    assert_eq!(err.to_string(), "catalog row 2: duplicate vehicle id 'rav4-2024'");
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = VehicleCatalog::from_json_reader(&b"[{\"id\": \"x\"}]"[..]).expect_err("missing fields");

    assert!(matches!(err, CatalogError::Json(_)));
}

#[test]
fn price_override_replaces_listing() {
    let catalog = VehicleCatalog::standard().expect("bundled catalog loads");

    let repriced = catalog
        .with_price_override("tacoma-2024", 33_250.0, Some("cars.com listing"))
        .expect("override applies");

    let tacoma = repriced.get("tacoma-2024").expect("tacoma listed");
    assert_eq!(tacoma.base_price, 33_250.0);
    assert_eq!(tacoma.price_source.as_deref(), Some("cars.com listing"));
    assert_eq!(
        catalog.get("tacoma-2024").expect("original untouched").base_price,
        31_700.0
    );
    assert_eq!(repriced.len(), catalog.len());
}

#[test]
fn price_override_rejects_bad_input() {
    let catalog = VehicleCatalog::standard().expect("bundled catalog loads");

    assert!(matches!(
        catalog.with_price_override("model-t-1908", 850.0, None),
        Err(CatalogError::UnknownVehicle { .. })
    ));
    assert!(matches!(
        catalog.with_price_override("tacoma-2024", -1.0, None),
        Err(CatalogError::InvalidPrice { .. })
    ));
}
