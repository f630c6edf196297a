use std::fs;

use approx::assert_relative_eq;
use arcstr::ArcStr;

use crate::design::{ComponentOptions, DesignFile};
use crate::prelude::*;
use crate::Error;

const DESIGN: &str = r#"
[[component]]
type = "frame"
name = "border"
frame_w = "4.5mm"
frame_h = 4500
f_width = "70um"

[[component]]
type = "fluxonium_pocket"
name = "Q1"
pos_x = "1mm"
orientation = "90deg"
L_j = "16.35nH"

[component.flux_bias_line_options]
make_fbl = true

[[component]]
type = "junction_array"
name = "array"
pos_y = -2000
layer = 2

[component.array_unit]
n_junction = 3
"#;

#[test]
fn frame_area() {
    let mut design = Design::new();
    let frame = design.add_component("frame", &Frame::default()).unwrap();
    assert_eq!(frame.table(Category::Poly).len(), 1);
    assert_relative_eq!(
        frame.get(Category::Poly, "frame").unwrap().shape().area(),
        4. * 9000. * 70. - 4. * 70. * 70.,
        max_relative = 1e-6
    );
}

#[test]
fn markers_around_origin() {
    let mut design = Design::new();
    let markers = design.add_component("markers", &Markers::default()).unwrap();
    assert_eq!(markers.table(Category::Poly).len(), 2);

    let squares = markers.get(Category::Poly, "markers").unwrap();
    assert!(!squares.is_subtract());
    let region = squares.shape().region().unwrap();
    assert_eq!(region.num_polygons(), 4);
    for polygon in region.polygons() {
        let c = Region::from_polygon(polygon.clone()).centroid().unwrap();
        assert_relative_eq!(c.x.abs(), 40., epsilon = 1e-3);
        assert_relative_eq!(c.y.abs(), 40., epsilon = 1e-3);
    }
    assert!(markers.get(Category::Poly, "markers_pk").unwrap().is_subtract());
}

#[test_log::test]
fn flux_bias_line_only() {
    let qubit = FluxoniumPocket {
        flux_bias_line_options: FluxBiasLineOptions {
            make_fbl: true,
            cpw_width: 12.,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut design = Design::new();
    let q1 = design.add_component("Q1", &qubit).unwrap();
    assert_eq!(q1.pins().len(), 1);
    let pin = q1.pin("Flux bias line").unwrap();
    assert_eq!(pin.width(), 12.);
    assert!(pin.input_as_norm());
}

#[test]
fn relative_vectors_rotate_with_the_component() {
    let anchors = |orientation: f64| {
        let tmon = Tmon {
            placement: Placement::at(-300., 250.).rotated(orientation),
            ..Default::default()
        };
        let mut design = Design::new();
        let geo = design.add_component("T1", &tmon).unwrap();
        let pad = geo.get(Category::Poly, "tmon").unwrap().shape().anchor().unwrap();
        let jj = geo
            .get(Category::Junction, "rect_jj")
            .unwrap()
            .shape()
            .anchor()
            .unwrap();
        jj - pad
    };
    let unrotated = anchors(0.);
    for angle in [37., 90., 215.] {
        assert_relative_eq!(
            anchors(angle),
            unrotated.transform(Transformation::rotate(angle)),
            epsilon = 1e-3
        );
    }
}

#[test_log::test]
fn failed_make_leaves_design_unchanged() {
    let mut design = Design::new();
    design.add_component("frame", &Frame::default()).unwrap();

    let mut tmon = Tmon::default();
    tmon.flux_bias_line_options.make_fbl = true;
    tmon.flux_bias_line_options.fbl_width = -1.;
    assert!(matches!(
        design.add_component("T1", &tmon),
        Err(Error::Configuration(_))
    ));
    assert!(design.component("T1").is_none());
    assert_eq!(design.len(), 1);

    // The name is still free.
    tmon.flux_bias_line_options.fbl_width = 30.;
    design.add_component("T1", &tmon).unwrap();
    assert_eq!(design.len(), 2);
}

#[test_log::test]
fn duplicate_component_names_are_rejected() {
    let mut design = Design::new();
    design.add_component("Q1", &Tmon::default()).unwrap();
    let err = design.add_component("Q1", &Frame::default()).unwrap_err();
    assert_eq!(err, Error::DuplicateComponent(ArcStr::from("Q1")));
    assert_eq!(err.to_string(), "design already has a component named `Q1`");

    let q1 = design.component("Q1").unwrap();
    assert!(q1.get(Category::Poly, "tmon").is_some());
    assert!(q1.get(Category::Poly, "frame").is_none());
}

#[test]
fn components_keep_chip_and_layer() {
    let mut design = Design::new();
    let frame = Frame {
        placement: Placement::default().on_layer(3),
        ..Default::default()
    };
    design.add_component("frame", &frame).unwrap();
    design.add_component("markers", &Markers::default()).unwrap();

    let names: Vec<_> = design.components().map(|c| c.name().as_str()).collect();
    assert_eq!(names, ["frame", "markers"]);
    let layers: Vec<_> = design
        .qgeometry(Category::Poly)
        .map(|(name, e)| (name.as_str(), e.layer_id()))
        .collect();
    assert_eq!(
        layers,
        [
            ("frame", Some(3)),
            ("markers", Some(1)),
            ("markers", Some(1))
        ]
    );
    assert!(design
        .qgeometry(Category::Poly)
        .all(|(_, e)| e.chip_name().map(|c| c.as_str()) == Some("main")));
}

#[test]
fn design_file_parses_units_and_sub_tables() {
    let file: DesignFile =
        config::document::from_document(DESIGN, std::path::Path::new("qlibrary.toml")).unwrap();
    assert_eq!(file.component.len(), 3);

    let ComponentOptions::Frame(frame) = &file.component[0].options else {
        panic!("expected a frame");
    };
    assert_eq!(frame.frame_w, 4500.);
    assert_eq!(frame.frame_h, 4500.);

    let ComponentOptions::FluxoniumPocket(qubit) = &file.component[1].options else {
        panic!("expected a fluxonium pocket");
    };
    assert_eq!(qubit.placement.origin(), Point::new(1000., 0.));
    assert_eq!(qubit.placement.orientation, 90.);
    assert!(qubit.flux_bias_line_options.make_fbl);
    assert!(!qubit.charge_line_options.make_cl);
    assert_eq!(qubit.pad_height, FluxoniumPocket::default().pad_height);
}

#[test_log::test]
fn design_from_toml() {
    let design = Design::from_toml_str(DESIGN).unwrap();
    assert_eq!(design.len(), 3);

    let border = design.component("border").unwrap();
    assert_relative_eq!(
        border.poly_area(false),
        4. * 4500. * 70. - 4. * 70. * 70.,
        max_relative = 1e-6
    );

    let pin = design.component("Q1").unwrap().pin("Flux bias line").unwrap();
    assert_eq!(pin.width(), 10.);

    let array = design.component("array").unwrap();
    assert_eq!(array.layer(), 2);
    assert_eq!(array.table(Category::Junction).len(), 3);
    assert_relative_eq!(
        array
            .get(Category::Poly, "jj_pad_0")
            .unwrap()
            .shape()
            .anchor()
            .unwrap(),
        Point::new(0., -2000.),
        epsilon = 1e-9
    );

    let junctions: Vec<_> = design
        .qgeometry(Category::Junction)
        .map(|(c, e)| format!("{c}.{}", e.name()))
        .collect();
    assert_eq!(
        junctions,
        [
            "Q1.inductor",
            "Q1.rect_jj",
            "array.rect_jj_0",
            "array.rect_jj_1",
            "array.rect_jj_2"
        ]
    );
}

#[test]
fn design_file_errors_have_context() {
    let err = Design::from_toml_str("[[component]]\ntype = \"resonator\"\nname = \"R1\"\n")
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid options in `<string>`");

    let duplicate = "[[component]]\ntype = \"tmon\"\nname = \"T1\"\n\n\
                     [[component]]\ntype = \"frame\"\nname = \"T1\"\n";
    let err = Design::from_toml_str(duplicate).unwrap_err();
    assert_eq!(err.to_string(), "failed to generate component `T1`");
    assert_eq!(
        err.root_cause().to_string(),
        "design already has a component named `T1`"
    );

    let bad_unit = "[[component]]\ntype = \"frame\"\nname = \"F\"\nf_width = \"70 furlongs\"\n";
    assert!(Design::from_toml_str(bad_unit).is_err());
}

#[test]
fn discover_walks_up_to_the_design_file() {
    let root = std::env::temp_dir().join(format!("qlibrary-discover-{}", std::process::id()));
    let nested = root.join("chips").join("q1");
    fs::create_dir_all(&nested).unwrap();
    fs::write(root.join(config::DESIGN_FILE_NAME), DESIGN).unwrap();

    let design = Design::discover(&nested).unwrap();
    assert!(design.component("Q1").is_some());

    fs::remove_dir_all(&root).unwrap();
    let err = Design::from_file(root.join(config::DESIGN_FILE_NAME)).unwrap_err();
    assert!(err.to_string().starts_with("failed to read"));
}
