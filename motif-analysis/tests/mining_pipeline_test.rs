//! End-to-end pipeline scenarios over a synthetic structure collection.
//!
//! The collection plants a tight catalytic-style triad (ASP-HIS-SER) in
//! 95% of structures and a loose distractor pair (LYS-TRP, 18 distance
//! units apart) in 40%, over a spread background.

use motif_core::config::PipelineConfig;
use motif_core::traits::{Cancellable, CancellationToken};
use motif_core::types::{StructureCollection, StructureGraph, StructureId};

use motif_analysis::pipeline::{MiningOutcome, MotifPipeline};

const STRUCTURES: usize = 20;
const CONTACT_CUTOFF: f64 = 20.0;

fn synthetic_collection() -> StructureCollection {
    let structures = (0..STRUCTURES)
        .map(|i| {
            let mut graph = StructureGraph::new(StructureId::new(format!("s{i:02}")));
            let jitter = (i % 5) as f64 * 0.05;

            // Tight triad in 19 of 20 structures (mean pairwise ~1.7).
            if i < 19 {
                graph.add_element("ASP", 1, [jitter, 0.0, 0.0]);
                graph.add_element("HIS", 2, [1.5 + jitter, 0.0, 0.0]);
                graph.add_element("SER", 3, [0.0, 1.5 + jitter, 0.0]);
            }

            // Loose distractor pair in 8 of 20 structures (18 apart).
            if i < 8 {
                graph.add_element("LYS", 4, [30.0, 0.0, 0.0]);
                graph.add_element("TRP", 5, [30.0, 0.0, 18.0]);
            }

            // Spread background present everywhere.
            graph.add_element("GLY", 6, [10.0, 10.0, 10.0]);
            graph.add_element("PHE", 7, [40.0, 40.0, 40.0]);
            graph.add_element("GLU", 8, [-20.0, 5.0, 30.0]);

            graph.connect_within(CONTACT_CUTOFF);
            graph
        })
        .collect();
    StructureCollection::new(structures)
}

fn config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    // Let the 40% distractor through the support gate so the geometric
    // filters have to reject it on their own.
    config.miner.minimal_support = 0.35;
    config
}

fn run() -> MiningOutcome {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let pipeline = MotifPipeline::new(config()).unwrap();
    pipeline
        .run(&synthetic_collection(), &CancellationToken::new())
        .unwrap()
        .data
}

#[test]
fn tight_triad_is_significant_and_distractor_is_not() {
    let outcome = run();

    let significant: Vec<String> = outcome
        .significant_itemsets()
        .iter()
        .map(|itemset| itemset.identifier())
        .collect();
    assert!(
        significant.iter().any(|id| id == "ASP-HIS-SER"),
        "triad missing from significant set: {significant:?}"
    );
    assert!(
        !significant.iter().any(|id| id.contains("LYS") || id.contains("TRP")),
        "distractor leaked into significant set: {significant:?}"
    );

    // The distractor's geometry (18 distance units) fails the cohesion
    // gate, so it never reaches significance testing at all.
    assert!(outcome
        .itemsets
        .iter()
        .all(|itemset| itemset.identifier() != "LYS-TRP"));
}

#[test]
fn triad_support_reflects_the_collection() {
    let outcome = run();
    let triad = outcome
        .itemsets
        .iter()
        .find(|itemset| itemset.identifier() == "ASP-HIS-SER")
        .expect("triad not mined");
    assert!((triad.support() - 0.95).abs() < 1e-10);
    assert_eq!(outcome.occurrences[triad].len(), 19);
}

#[test]
fn every_occurrence_is_graph_connected() {
    let collection = synthetic_collection();
    let pipeline = MotifPipeline::new(config()).unwrap();
    let outcome = pipeline
        .run(&collection, &CancellationToken::new())
        .unwrap()
        .data;

    for (itemset, occurrences) in &outcome.occurrences {
        for occurrence in occurrences {
            let graph = collection.get(occurrence.structure).unwrap();
            // Connectivity invariant: the induced contact subgraph of the
            // occurrence is connected.
            let mut reached = vec![occurrence.vertices[0]];
            let mut frontier = vec![occurrence.vertices[0]];
            while let Some(current) = frontier.pop() {
                for &other in &occurrence.vertices {
                    if !reached.contains(&other) && graph.adjacent(current, other) {
                        reached.push(other);
                        frontier.push(other);
                    }
                }
            }
            assert_eq!(
                reached.len(),
                occurrence.vertices.len(),
                "disconnected occurrence of {}",
                itemset.identifier()
            );
        }
    }
}

#[test]
fn verdicts_are_reproducible_across_runs() {
    let first = run();
    let second = run();

    let verdicts = |outcome: &MiningOutcome| -> Vec<(String, bool)> {
        outcome
            .records
            .iter()
            .map(|record| (record.itemset.identifier(), record.is_significant()))
            .collect()
    };
    assert_eq!(verdicts(&first), verdicts(&second));
}

#[test]
fn cancellation_mid_run_preserves_completed_state() {
    let collection = synthetic_collection();
    let pipeline = MotifPipeline::new(config()).unwrap();
    let token = CancellationToken::new();
    token.cancel();
    // Pre-cancelled: the run aborts before any level.
    assert!(pipeline.run(&collection, &token).is_err());
}
