//! End-to-end tests for ingestion and the four graph queries.

use archlens::QueryFacade;
use archlens::domain::{DependencyBatch, EdgeDescriptor};
use rstest::{fixture, rstest};

mod common;
use common::{batch, chain, demo_batch};

#[fixture]
async fn demo() -> QueryFacade {
    let facade = QueryFacade::new();
    facade.ingest(demo_batch()).await.expect("demo batch is valid");
    facade
}

// ============================================================================
// Demo Repository
// ============================================================================

#[rstest]
#[tokio::test]
async fn demo_impact(#[future] demo: QueryFacade) {
    let facade = demo.await;
    let report = facade.impact("demo", "a", Some(2)).await;

    let affected: Vec<(&str, usize)> = report
        .affected_files
        .iter()
        .map(|f| (f.path.as_str(), f.distance))
        .collect();
    assert_eq!(affected, vec![("b", 1), ("c", 2)]);
    assert_eq!(report.total_impact, 2);
    assert_eq!(report.max_depth, 2);
}

#[rstest]
#[tokio::test]
async fn demo_cycles(#[future] demo: QueryFacade) {
    let report = demo.await.cycles("demo").await;
    assert_eq!(report.total, 1);
    assert_eq!(report.cycles, vec![vec!["a", "b", "c", "a"]]);
}

#[rstest]
#[tokio::test]
async fn demo_hotspots(#[future] demo: QueryFacade) {
    let report = demo.await.hotspots("demo").await;

    let ranked: Vec<(&str, usize)> = report
        .hotspots
        .iter()
        .map(|h| (h.path.as_str(), h.total_degree))
        .collect();
    assert_eq!(ranked, vec![("a", 2), ("b", 2), ("c", 2)]);
}

#[rstest]
#[case::default_depth(None, 3)]
#[case::below_range(Some(-4), 1)]
#[case::zero(Some(0), 1)]
#[case::in_range(Some(4), 4)]
#[case::above_range(Some(99), 5)]
#[tokio::test]
async fn impact_depth_is_clamped(#[case] depth: Option<i64>, #[case] expected: usize) {
    let facade = QueryFacade::new();
    facade.ingest(chain("chain", 8)).await.unwrap();

    let report = facade.impact("chain", "f0", depth).await;
    assert_eq!(report.max_depth, expected);
    assert_eq!(report.total_impact, expected);
    assert_eq!(report.affected_files.last().map(|f| f.distance), Some(expected));
}

// ============================================================================
// Upsert Semantics
// ============================================================================

#[tokio::test]
async fn reingesting_a_batch_is_idempotent() {
    let facade = QueryFacade::new();
    facade.ingest(demo_batch()).await.unwrap();
    let first = facade.list_edges("demo").await;

    facade.ingest(demo_batch()).await.unwrap();
    let second = facade.list_edges("demo").await;

    assert_eq!(first, second);
    assert_eq!(second.total, 3);
}

#[tokio::test]
async fn same_key_overwrites_weight() {
    let facade = QueryFacade::new();
    let write = |weight: f64, analysis: &str| {
        DependencyBatch::new(
            "r",
            analysis,
            vec![EdgeDescriptor::new("a", "b", "import").with_weight(weight)],
        )
    };

    facade.ingest(write(1.0, "run-1")).await.unwrap();
    facade.ingest(write(2.0, "run-2")).await.unwrap();

    let listing = facade.list_edges("r").await;
    assert_eq!(listing.total, 1);
    assert!((listing.edges[0].weight - 2.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn different_types_are_distinct_edges() {
    let facade = QueryFacade::new();
    facade
        .ingest(DependencyBatch::new(
            "r",
            "run-1",
            vec![
                EdgeDescriptor::new("a", "b", "import"),
                EdgeDescriptor::new("a", "b", "call"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(facade.list_edges("r").await.total, 2);

    // Degree counts neighbours, not edges
    let hotspots = facade.hotspots("r").await.hotspots;
    assert_eq!(hotspots[0].path, "a");
    assert_eq!(hotspots[0].out_degree, 1);
}

#[tokio::test]
async fn omitted_weight_defaults_to_one() {
    let facade = QueryFacade::new();
    let batch: DependencyBatch = serde_json::from_str(
        r#"{"repoId": "r", "analysisId": "run-1",
            "edges": [{"sourcePath": "a", "targetPath": "b", "depType": "import"}]}"#,
    )
    .unwrap();

    facade.ingest(batch).await.unwrap();
    assert!((facade.list_edges("r").await.edges[0].weight - 1.0).abs() < f64::EPSILON);
}

// ============================================================================
// Partitions and Caps
// ============================================================================

#[tokio::test]
async fn repositories_are_isolated() {
    let facade = QueryFacade::new();
    facade.ingest(batch("r1", "run-1", &[("a", "b"), ("b", "a")])).await.unwrap();
    facade.ingest(batch("r2", "run-1", &[("x", "y")])).await.unwrap();

    assert_eq!(facade.list_edges("r2").await.total, 1);
    assert!(facade.cycles("r2").await.cycles.is_empty());
    assert!(facade.impact("r2", "a", None).await.affected_files.is_empty());
    assert_eq!(facade.cycles("r1").await.total, 1);
}

#[tokio::test]
async fn listing_is_capped_at_one_thousand() {
    let facade = QueryFacade::new();
    let edges: Vec<EdgeDescriptor> = (0..1500)
        .map(|i| EdgeDescriptor::new(format!("src/{i}.rs"), "src/lib.rs", "import"))
        .collect();
    facade
        .ingest(DependencyBatch::new("big", "run-1", edges))
        .await
        .unwrap();

    let listing = facade.list_edges("big").await;
    assert_eq!(listing.total, 1000);
    assert_eq!(listing.edges.len(), 1000);
    assert_eq!(listing.edges[0].source, "src/0.rs");
    assert_eq!(listing.edges[999].source, "src/999.rs");
}

#[tokio::test]
async fn cycle_report_is_capped_at_fifty() {
    // Complete digraph on 8 files holds thousands of short cycles
    let names: Vec<String> = (0..8).map(|i| format!("m{i}")).collect();
    let mut pairs = Vec::new();
    for s in &names {
        for t in &names {
            if s != t {
                pairs.push((s.as_str(), t.as_str()));
            }
        }
    }

    let facade = QueryFacade::new();
    facade.ingest(batch("dense", "run-1", &pairs)).await.unwrap();

    let report = facade.cycles("dense").await;
    assert_eq!(report.total, 50);
    assert_eq!(report.cycles.len(), 50);
}

#[tokio::test]
async fn hotspots_return_top_twenty() {
    let names: Vec<String> = (0..40).map(|i| format!("f{i:02}")).collect();
    let pairs: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "hub")).collect();

    let facade = QueryFacade::new();
    facade.ingest(batch("wide", "run-1", &pairs)).await.unwrap();

    let hotspots = facade.hotspots("wide").await.hotspots;
    assert_eq!(hotspots.len(), 20);
    assert_eq!(hotspots[0].path, "hub");
    assert_eq!(hotspots[0].in_degree, 40);
    assert_eq!(hotspots[1].path, "f00");
    assert_eq!(hotspots[19].path, "f18");
}

#[tokio::test]
async fn rejected_batch_does_not_create_repository() {
    let facade = QueryFacade::new();
    let bad = DependencyBatch::new(
        "fresh",
        "run-1",
        vec![
            EdgeDescriptor::new("a", "b", "import"),
            EdgeDescriptor::new("", "c", "import"),
        ],
    );

    let err = facade.ingest(bad).await.unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("index 1"));
    assert_eq!(facade.repository_count(), 0);
    assert_eq!(facade.list_edges("fresh").await.total, 0);
}
