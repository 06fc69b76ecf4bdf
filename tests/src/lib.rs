#[cfg(test)]
mod tests {
    use std::{fs, path::Path, time::Duration};

    use bag::{mock::MockPages, BoundingBox, Collection, PANDEN_FILE_NAME};
    use geo_types::Geometry;
    use kaart::{
        debounce, Alert, DrawState, LogSurface, MapEvent, Overlay, SurfaceCall, Viewer,
        ViewerConfig, Viewport,
    };
    use rd::{LatLon, ProjTransform};
    use reqwest::StatusCode;
    use serde_json::Value;
    use tempfile::TempDir;

    fn viewer(source: MockPages, out_dir: &Path) -> Viewer<MockPages, LogSurface> {
        let config = ViewerConfig {
            out_dir: out_dir.to_path_buf(),
            ..ViewerConfig::default()
        };
        Viewer::new(
            config,
            Box::new(ProjTransform::new().unwrap()),
            source,
            LogSurface::new(),
        )
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    async fn draw(v: &mut Viewer<MockPages, LogSurface>, a: LatLon, b: LatLon) -> BoundingBox {
        assert!(v.start_drawing());
        v.handle(MapEvent::Click(a)).await.unwrap();
        v.handle(MapEvent::Click(b)).await.unwrap();
        v.current_bbox().unwrap()
    }

    #[tokio::test]
    async fn drawn_box_is_downloaded() {
        let dir = TempDir::new().unwrap();
        let mut v = viewer(MockPages::scripted([50, 50, 30], None), dir.path());

        let bbox = draw(
            &mut v,
            LatLon::new(52.0160, 4.3520),
            LatLon::new(52.0080, 4.3650),
        )
        .await;
        assert!(matches!(v.session().state(), DrawState::Drawn { .. }));
        assert_eq!(v.use_bbox_for_download(), Ok(bbox));
        assert_eq!(v.panel().bbox_field, bbox.to_string());

        let outcome = v.download_panden("", "").await;
        let alert = v.report(Collection::Panden, &outcome);
        assert_eq!(alert, Alert("Successfully downloaded 130 buildings!".into()));

        let requests = v.source().requests();
        assert_eq!(
            requests.iter().map(|r| r.offset).collect::<Vec<_>>(),
            [0, 50, 100]
        );
        let query: Vec<(String, String)> = requests[0]
            .base
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let expected: Vec<(String, String)> = bbox
            .query_pairs()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(query, expected);

        let written = read_json(&dir.path().join(PANDEN_FILE_NAME));
        assert_eq!(written["type"], "FeatureCollection");
        assert_eq!(written["features"].as_array().unwrap().len(), 130);
        assert_eq!(written["features"][129]["id"], "pand-129");
    }

    #[tokio::test]
    async fn filters_take_precedence_over_the_view() {
        let dir = TempDir::new().unwrap();
        let v = viewer(MockPages::dataset(3, true), dir.path());

        let report = v.download_panden(" Delft ", "").await.unwrap();
        assert_eq!(report.count, 3);

        let base = &v.source().requests()[0].base;
        assert!(base.path().ends_with("/collections/panden/items"));
        let keys: Vec<String> = base.query_pairs().map(|(k, _)| k.into_owned()).collect();
        assert_eq!(keys, ["woonplaats"]);
    }

    #[tokio::test]
    async fn without_filters_the_view_is_used() {
        let dir = TempDir::new().unwrap();
        let v = viewer(MockPages::dataset(0, true), dir.path());

        let report = v.download_panden("", "").await.unwrap();
        assert_eq!(report.count, 0);

        let keys: Vec<String> = v.source().requests()[0]
            .base
            .query_pairs()
            .map(|(k, _)| k.into_owned())
            .collect();
        assert_eq!(keys, ["minx", "miny", "maxx", "maxy"]);

        // an empty result still writes a (valid, empty) file
        let written = read_json(&report.path);
        assert_eq!(written["features"], Value::Array(vec![]));
    }

    #[tokio::test]
    async fn failed_download_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let v = viewer(
            MockPages::dataset(200, true).failing_at(2, StatusCode::INTERNAL_SERVER_ERROR),
            dir.path(),
        );

        let outcome = v.download_panden("", "2611").await;
        assert!(outcome.is_err());
        assert!(!dir.path().join(PANDEN_FILE_NAME).exists());

        let alert = v.report(Collection::Panden, &outcome);
        assert!(alert.0.starts_with("Download failed: API error: 500"));
        assert!(alert.0.ends_with(&format!(
            "Make sure your API is running on {}",
            v.api().collection_url(Collection::Panden).unwrap()
        )));
    }

    #[tokio::test]
    async fn vbo_download_per_pand() {
        let dir = TempDir::new().unwrap();
        let v = viewer(MockPages::dataset(4, true), dir.path());

        let report = v.download_vbo(" 0503100000032914 ").await.unwrap();
        assert_eq!(
            report.path,
            dir.path().join("bag_vbo_0503100000032914.geojson")
        );
        let base = &v.source().requests()[0].base;
        assert!(base.path().ends_with("/collections/verblijfsobjecten/items"));
        assert_eq!(
            base.query_pairs().next().map(|(k, v)| (k.into_owned(), v.into_owned())),
            Some(("pandRef".into(), "0503100000032914".into()))
        );
    }

    #[tokio::test]
    async fn vbo_alerts() {
        let dir = TempDir::new().unwrap();
        let v = viewer(MockPages::dataset(0, true), dir.path());

        let blank = v.download_vbo("  ").await;
        assert_eq!(
            v.report(Collection::Verblijfsobjecten, &blank),
            Alert("Please enter a Pand ID to download verblijfsobjecten".into())
        );
        assert!(v.source().requests().is_empty());

        let none = v.download_vbo("123").await;
        assert_eq!(
            v.report(Collection::Verblijfsobjecten, &none),
            Alert("No verblijfsobjecten found for Pand ID: 123".into())
        );
        assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn clear_resets_everything() {
        let dir = TempDir::new().unwrap();
        let mut v = viewer(MockPages::dataset(0, true), dir.path());

        assert!(v.start_drawing());
        v.handle(MapEvent::Click(LatLon::new(52.01, 4.35))).await.unwrap();
        assert_eq!(v.map().live_layers().len(), 1);

        v.clear_bbox();
        assert_eq!(v.session().state(), DrawState::Idle);
        assert!(v.map().live_layers().is_empty());
        assert!(v.panel().draw_enabled);
        assert!(!v.panel().clear_enabled);
        assert_eq!(v.panel().coordinates, None);
        assert_eq!(
            v.map().calls.last(),
            Some(&SurfaceCall::SetCursor(kaart::Cursor::Default))
        );
    }

    #[tokio::test]
    async fn preview_shows_buildings_in_degrees() {
        let dir = TempDir::new().unwrap();
        let mut v = viewer(MockPages::dataset(5, true), dir.path());

        v.handle(MapEvent::OverlayAdd(Overlay::Buildings)).await.unwrap();
        let shown = &v.map().buildings;
        assert_eq!(shown.len(), 5);
        let Geometry::Polygon(p) = &shown[0].geometry else {
            panic!("expected a polygon");
        };
        let c = p.exterior().0[0];
        assert!((4.0..5.0).contains(&c.x), "lon {}", c.x);
        assert!((51.9..52.1).contains(&c.y), "lat {}", c.y);
        assert_eq!(shown[0].popup[0], "Building ID: pand-0");

        let request = &v.source().requests()[0];
        assert_eq!(request.limit, 100);
    }

    #[tokio::test(start_paused = true)]
    async fn map_moves_are_debounced() {
        let dir = TempDir::new().unwrap();
        let mut v = viewer(MockPages::dataset(2, true), dir.path());
        v.handle(MapEvent::OverlayAdd(Overlay::Buildings)).await.unwrap();

        let (moves, mut settled) = debounce(Duration::from_millis(300));
        let last = Viewport::new(LatLon::new(52.0, 4.36), LatLon::new(52.01, 4.38));
        for step in 0..5 {
            let lat = 52.0 + step as f64 * 0.001;
            moves
                .send(Viewport::new(LatLon::new(lat, 4.35), LatLon::new(lat + 0.01, 4.37)))
                .unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        moves.send(last).unwrap();

        let viewport = settled.next().await.unwrap();
        assert_eq!(viewport, last);
        v.handle(MapEvent::MoveEnd(viewport)).await.unwrap();

        assert_eq!(v.viewport(), last);
        assert_eq!(v.source().requests().len(), 2);
    }
}
