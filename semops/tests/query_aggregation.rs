//! Aggregation of streamed query results.
//!
//! The engines here replay data with a little latency and then end the
//! stream the way each test asks: cleanly, with an error, or by simply going
//! away. `ReplayEngine` echoes its sources; `ScriptedEngine` emits a fixed
//! script so ordering can be checked against data that is not sorted.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use semops::query::{
    event_channel, Bindings, EngineError, EventStream, QueryAggregator, QueryEngine,
};
use semops::{Dataset, Quad, QueryError, Term};

#[derive(Debug, Clone, Copy)]
enum Outcome {
    End,
    Fail(&'static str),
    Abandon,
}

/// Treats every query as "return everything": CONSTRUCT echoes the source
/// quads, SELECT binds `?s` and `?o`, ASK checks for any data at all.
struct ReplayEngine {
    outcome: Outcome,
}

fn replay<T: Send + 'static>(items: Vec<T>, outcome: Outcome) -> EventStream<T> {
    let (sink, stream) = event_channel();
    tokio::spawn(async move {
        for item in items {
            tokio::time::sleep(Duration::from_millis(1)).await;
            if !sink.data(item) {
                return;
            }
        }
        match outcome {
            Outcome::End => sink.end(),
            Outcome::Fail(msg) => sink.error(msg),
            Outcome::Abandon => drop(sink),
        }
    });
    stream
}

impl QueryEngine for ReplayEngine {
    fn construct(&self, _query: &str, sources: &[&Dataset]) -> EventStream<Quad> {
        let quads = sources.iter().flat_map(|ds| ds.iter().cloned()).collect();
        replay(quads, self.outcome)
    }

    fn select(&self, _query: &str, sources: &[&Dataset]) -> EventStream<Bindings> {
        let rows = sources
            .iter()
            .flat_map(|ds| ds.iter())
            .map(|q| {
                vec![
                    ("s".to_owned(), q.subject().clone()),
                    ("o".to_owned(), q.object().clone()),
                ]
            })
            .collect();
        replay(rows, self.outcome)
    }

    fn ask(
        &self,
        _query: &str,
        sources: &[&Dataset],
    ) -> impl Future<Output = Result<bool, EngineError>> + Send {
        let answer: Result<bool, EngineError> = match self.outcome {
            Outcome::Fail(msg) => Err(msg.into()),
            _ => Ok(sources.iter().any(|ds| !ds.is_empty())),
        };
        async move {
            tokio::task::yield_now().await;
            answer
        }
    }
}

/// Ignores query and sources and plays back a fixed script.
struct ScriptedEngine {
    quads: Vec<Quad>,
    rows: Vec<Bindings>,
    outcome: Outcome,
}

impl QueryEngine for ScriptedEngine {
    fn construct(&self, _query: &str, _sources: &[&Dataset]) -> EventStream<Quad> {
        replay(self.quads.clone(), self.outcome)
    }

    fn select(&self, _query: &str, _sources: &[&Dataset]) -> EventStream<Bindings> {
        replay(self.rows.clone(), self.outcome)
    }

    fn ask(
        &self,
        _query: &str,
        _sources: &[&Dataset],
    ) -> impl Future<Output = Result<bool, EngineError>> + Send {
        std::future::ready(Ok(true))
    }
}

fn row(var: &str, value: &str) -> Bindings {
    vec![(var.to_owned(), Term::simple_literal(value))]
}

fn scripted(
    quads: Vec<Quad>,
    rows: Vec<Bindings>,
    outcome: Outcome,
) -> QueryAggregator<ScriptedEngine> {
    QueryAggregator::new(ScriptedEngine {
        quads,
        rows,
        outcome,
    })
}

fn aggregator(outcome: Outcome) -> QueryAggregator<ReplayEngine> {
    QueryAggregator::new(ReplayEngine { outcome })
}

fn people() -> Result<Dataset> {
    let mut ds = Dataset::new();
    for (who, age) in [("alice", "42"), ("bob", "7")] {
        ds.insert(Quad::new(
            Term::iri(format!("https://example.org/{}", who)),
            "https://example.org/age",
            Term::simple_literal(age),
        )?);
    }
    Ok(ds)
}

const QUERY: &str = "CONSTRUCT { ?s ?p ?o } WHERE { ?s ?p ?o }";

// =============================================================================
// CONSTRUCT
// =============================================================================

#[tokio::test]
async fn construct_collects_in_emission_order() -> Result<()> {
    let a = people()?;
    let b = Dataset::from_iter([Quad::new(
        Term::blank("x"),
        "https://example.org/p",
        Term::iri("urn:y"),
    )?]);
    let quads = aggregator(Outcome::End).construct_quads(QUERY, &[&a, &b], None).await?;

    let expected: Vec<Quad> = a.iter().chain(b.iter()).cloned().collect();
    assert_eq!(quads, expected);
    Ok(())
}

#[tokio::test]
async fn construct_keeps_unsorted_emission_order() -> Result<()> {
    let script = vec![
        Quad::new(Term::iri("urn:s2"), "urn:p", Term::simple_literal("b"))?,
        Quad::new(Term::iri("urn:s1"), "urn:p", Term::simple_literal("a"))?,
        Quad::new(Term::iri("urn:s3"), "urn:p", Term::simple_literal("c"))?,
    ];
    let quads = scripted(script.clone(), Vec::new(), Outcome::End)
        .construct_quads(QUERY, &[], None)
        .await?;
    assert_eq!(quads, script);
    Ok(())
}

#[tokio::test]
async fn construct_commits_to_target_on_success() -> Result<()> {
    let source = people()?;
    let mut target = Dataset::new();
    let quads = aggregator(Outcome::End)
        .construct_quads(QUERY, &[&source], Some(&mut target))
        .await?;
    assert_eq!(quads.len(), 2);
    assert_eq!(target, source);
    Ok(())
}

#[tokio::test]
async fn construct_failure_discards_partial_results() -> Result<()> {
    let source = people()?;
    let mut target = Dataset::new();
    let err = aggregator(Outcome::Fail("engine exploded"))
        .construct_quads(QUERY, &[&source], Some(&mut target))
        .await
        .expect_err("stream reported an error");
    assert!(matches!(err, QueryError::Stream(_)));
    assert!(err.to_string().contains("engine exploded"));
    assert!(target.is_empty());
    Ok(())
}

#[tokio::test]
async fn abandoned_stream_is_an_error() -> Result<()> {
    let source = people()?;
    let err = aggregator(Outcome::Abandon)
        .construct_quads(QUERY, &[&source], None)
        .await
        .expect_err("no terminal event");
    assert!(matches!(err, QueryError::Closed));
    Ok(())
}

#[tokio::test]
async fn empty_sources_end_with_no_results() -> Result<()> {
    let quads = aggregator(Outcome::End).construct_quads(QUERY, &[], None).await?;
    assert!(quads.is_empty());
    Ok(())
}

// =============================================================================
// SELECT
// =============================================================================

#[tokio::test]
async fn select_flattens_bound_terms() -> Result<()> {
    let source = people()?;
    let rows = aggregator(Outcome::End)
        .select_bindings("SELECT ?s ?o WHERE { ?s ?p ?o }", &[&source])
        .await?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("s"), Some("https://example.org/alice"));
    assert_eq!(rows[0].get("o"), Some("42"));
    assert_eq!(rows[1].get("o"), Some("7"));
    assert_eq!(rows[1].get("p"), None);
    Ok(())
}

#[tokio::test]
async fn select_keeps_unsorted_emission_order() -> Result<()> {
    let rows = scripted(Vec::new(), vec![row("x", "2"), row("x", "1")], Outcome::End)
        .select_bindings("SELECT ?x WHERE { ?x ?p ?o }", &[])
        .await?;
    let xs: Vec<Option<&str>> = rows.iter().map(|r| r.get("x")).collect();
    assert_eq!(xs, [Some("2"), Some("1")]);
    Ok(())
}

#[tokio::test]
async fn select_error_after_a_row_is_an_error() {
    let result = scripted(Vec::new(), vec![row("x", "2")], Outcome::Fail("lost connection"))
        .select_bindings("SELECT ?x WHERE { ?x ?p ?o }", &[])
        .await;
    match result {
        Err(QueryError::Stream(msg)) => assert!(msg.to_string().contains("lost connection")),
        other => panic!("expected a stream error, got {:?}", other),
    }
}

#[tokio::test]
async fn select_failure_returns_no_rows() -> Result<()> {
    let source = people()?;
    let result = aggregator(Outcome::Fail("timeout"))
        .select_bindings("SELECT * WHERE { ?s ?p ?o }", &[&source])
        .await;
    assert!(matches!(result, Err(QueryError::Stream(_))));
    Ok(())
}

// =============================================================================
// ASK
// =============================================================================

#[tokio::test]
async fn ask_resolves_to_the_engine_answer() -> Result<()> {
    let source = people()?;
    let engine = aggregator(Outcome::End);
    assert!(engine.ask_boolean("ASK { ?s ?p ?o }", &[&source]).await?);
    assert!(!engine.ask_boolean("ASK { ?s ?p ?o }", &[&Dataset::new()]).await?);
    Ok(())
}

#[tokio::test]
async fn ask_failure_is_reported() {
    let result = aggregator(Outcome::Fail("bad query"))
        .ask_boolean("ASK {", &[])
        .await;
    assert!(matches!(result, Err(QueryError::Engine(_))));
}
