//! Subcommand handlers

use crate::config::CivicConfig;
use crate::Command;
use anyhow::{Context, Result};
use civic_classifiers::{ContentAnalyzer, KeywordClassifier};
use civic_core::{GeoPoint, RankableIssue};
use civic_ranking::{IssueFilter, Ranker, StatusCounts};
use civic_reports::{
    MemoryDashboardSink, MemoryReportStore, ReportDraft, ReportLocation, ReportService, Reporter,
    SuggestionField,
};
use civic_telemetry::MetricsCollector;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

pub async fn run(command: Command, config: &CivicConfig, metrics: &MetricsCollector) -> Result<Value> {
    match command {
        Command::Classify {
            title, description, ..
        } => classify(config, metrics, &title, &description),
        Command::Analyze { title, description } => analyze(&title, &description),
        Command::Rank {
            issues,
            lat,
            lng,
            sort,
            radius,
            nearby,
            min_priority,
            status,
        } => {
            let issues = load_issues(&issues)?;
            let reference = reference_point(lat, lng)?;
            let ranker = Ranker::new(config.ranking.clone())?;

            let filter = IssueFilter {
                max_distance_km: radius,
                min_priority,
                status,
                ..Default::default()
            };
            let ranked = if nearby {
                let mut ranked = ranker.nearby(reference, &issues);
                filter.retain(&mut ranked);
                ranked
            } else {
                let key = sort.unwrap_or(config.ranking.default_sort);
                ranker.rank_filtered(reference, &issues, key, &filter)
            };

            Ok(json!({
                "counts": StatusCounts::tally(&issues),
                "issues": ranked,
            }))
        }
        Command::Submit {
            title,
            description,
            lat,
            lng,
            address,
            name,
            email,
            phone,
            category,
            priority,
            accept_title,
        } => {
            let location = ReportLocation {
                point: reference_point(lat, lng)?,
                address,
            };
            let mut draft = ReportDraft::new(title, description, location);
            draft.category = category;
            draft.priority = priority;
            let reporter = Reporter { name, email, phone };
            submit(config, metrics, draft, reporter, accept_title).await
        }
    }
}

fn classify(
    config: &CivicConfig,
    metrics: &MetricsCollector,
    title: &str,
    description: &str,
) -> Result<Value> {
    let classifier = KeywordClassifier::with_settings(config.classifier.clone())?;
    let result = classifier.classify_issue(title, description);

    metrics.record_classification(result.category, result.priority);
    debug!(category = %result.category, confidence = result.confidence, "classified");

    Ok(serde_json::to_value(result)?)
}

fn analyze(title: &str, description: &str) -> Result<Value> {
    let analyzer = ContentAnalyzer::new()?;
    Ok(json!({
        "analysis": analyzer.analyze(title, description),
        "suggestions": analyzer.smart_suggestions(),
    }))
}

async fn submit(
    config: &CivicConfig,
    metrics: &MetricsCollector,
    mut draft: ReportDraft,
    reporter: Reporter,
    accept_title: bool,
) -> Result<Value> {
    let classifier = KeywordClassifier::with_settings(config.classifier.clone())?;
    let analyzer = ContentAnalyzer::new()?;

    let local = Arc::new(MemoryReportStore::new());
    let dashboard = Arc::new(MemoryDashboardSink::new());
    let service = ReportService::new(local)
        .with_remote(dashboard.clone())
        .with_metrics(metrics.clone());

    let suggestion = service.suggest(&classifier, &draft).await?;
    let urgency = analyzer.analyze(&draft.title, &draft.description).urgency;
    draft.auto_fill(&suggestion, Some(urgency));
    if accept_title {
        draft.apply_suggestion(SuggestionField::Title, &suggestion);
    }

    let id = service
        .submit(draft, reporter)
        .await
        .with_context(|| {
            format!(
                "report not submitted (suggested {} / {} at {:.2} confidence)",
                suggestion.category, suggestion.priority, suggestion.confidence
            )
        })?;
    let payload = dashboard
        .payloads()
        .pop()
        .context("dashboard sink received no payload")?;

    Ok(json!({
        "id": id,
        "dashboard": payload,
        "metrics": metrics.snapshot(),
    }))
}

fn load_issues(path: &str) -> Result<Vec<RankableIssue>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    // JSON is valid YAML, so one parser covers both formats
    let issues: Vec<RankableIssue> =
        serde_yaml::from_str(&content).with_context(|| format!("failed to parse {path}"))?;
    Ok(issues)
}

fn reference_point(lat: f64, lng: f64) -> Result<GeoPoint> {
    let point = GeoPoint::new(lat, lng);
    anyhow::ensure!(point.is_valid(), "coordinates out of range: {lat}, {lng}");
    Ok(point)
}
