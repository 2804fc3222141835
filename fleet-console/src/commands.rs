//! Subcommand handlers

use anyhow::Context;
use asset_mappings::AssetMappingViewer;
use fleet_client::{FleetApi, GeotabClient};
use shared::{AlertSink, TracingAlerts};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use yard_zones::{
    BoardSnapshot, DEFAULT_SEARCH_DEBOUNCE, DragController, DropOutcome, ExportFormat,
    ListSnapshot, SearchDebouncer, ZoneClassifier, ZoneList,
};

type Classifier = ZoneClassifier<GeotabClient, TracingAlerts>;

async fn open_classifier(client: GeotabClient) -> anyhow::Result<Classifier> {
    ZoneClassifier::activate(client, TracingAlerts)
        .await
        .context("loading zones")
}

pub async fn zones_list(
    client: GeotabClient,
    regular_search: &str,
    yard_move_search: &str,
    json: bool,
) -> anyhow::Result<()> {
    let classifier = open_classifier(client).await?;
    classifier.set_search(ZoneList::Regular, regular_search);
    classifier.set_search(ZoneList::YardMove, yard_move_search);

    let snapshot = classifier.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_board(&snapshot);
    }
    classifier.teardown();
    Ok(())
}

pub async fn zones_search(client: GeotabClient, list: ZoneList, json: bool) -> anyhow::Result<()> {
    let classifier = open_classifier(client).await?;
    let (mut debouncer, mut settled) = SearchDebouncer::new(DEFAULT_SEARCH_DEBOUNCE);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last = None;

    let apply = |term: String| -> anyhow::Result<()> {
        classifier.set_search(list, term);
        let snapshot = classifier.snapshot();
        let view = match list {
            ZoneList::Regular => &snapshot.regular,
            ZoneList::YardMove => &snapshot.yard_move,
        };
        if json {
            println!("{}", serde_json::to_string(view)?);
        } else {
            print_list(view);
        }
        Ok(())
    };

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    debouncer.input(line.clone());
                    last = Some(line);
                }
                None => break,
            },
            Some(term) = settled.recv() => apply(term)?,
        }
    }

    // End of input: apply whatever was typed last without waiting
    debouncer.cancel();
    if let Some(term) = last
        && term != classifier.search_term(list)
    {
        apply(term)?;
    }
    classifier.teardown();
    Ok(())
}

pub async fn zones_move(client: GeotabClient, zone_id: &str, to: ZoneList) -> anyhow::Result<()> {
    let classifier = open_classifier(client).await?;
    println!("{}", move_by_drag(classifier, zone_id, to).await?);
    Ok(())
}

/// A move is driven through the same drag gesture a pointer would make.
/// The classifier is torn down whatever the outcome.
async fn move_by_drag<A: FleetApi, N: AlertSink>(
    classifier: ZoneClassifier<A, N>,
    zone_id: &str,
    to: ZoneList,
) -> anyhow::Result<String> {
    let mut drag = DragController::new();

    let result = if drag.drag_start_zone(&classifier, zone_id) {
        drag.drag_enter(to);
        match drag.drop_on(to, &classifier).await {
            DropOutcome::Ignored => Ok(format!("{zone_id} is already in {}", to.title())),
            DropOutcome::Committed(Ok(outcome)) => Ok(format!(
                "{} moved to {}",
                outcome.zone_name,
                outcome.to.title()
            )),
            DropOutcome::Committed(Err(e)) => Err(e.into()),
        }
    } else {
        Err(anyhow::anyhow!("zone {zone_id} not found"))
    };

    classifier.teardown();
    result
}

pub async fn zones_export(
    client: GeotabClient,
    format: ExportFormat,
    out: &Path,
) -> anyhow::Result<()> {
    let classifier = open_classifier(client).await?;
    let exported = classifier.export_to_dir(format, out);
    classifier.teardown();
    println!("{}", exported?.display());
    Ok(())
}

pub async fn assets_list(client: GeotabClient, json: bool) -> anyhow::Result<()> {
    let session = client.session().clone();
    let viewer = AssetMappingViewer::new(client, TracingAlerts);
    viewer.load().await;

    let rows = viewer.rows();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<24} {:<16} {:<20} {:<16} GT Device",
        "Asset Name", "Ruckit Device", "Ruckit Driver", "Ruckit Token"
    );
    for row in &rows {
        println!(
            "{:<24} {:<16} {:<20} {:<16} {}",
            row.asset_name,
            row.ri_device,
            row.ri_driver,
            row.ri_token,
            row.device_url(&session).unwrap_or_else(|| "N/A".into())
        );
    }
    println!("{}", viewer.summary());
    Ok(())
}

pub async fn assets_export(client: GeotabClient, out: &Path) -> anyhow::Result<()> {
    let viewer = AssetMappingViewer::new(client, TracingAlerts);
    viewer.load().await;
    let path = viewer.export_to_dir(out)?;
    println!("{}", path.display());
    Ok(())
}

fn print_board(snapshot: &BoardSnapshot) {
    if let Some(error) = &snapshot.load_error {
        println!("Load failed: {error}");
    }
    if snapshot.yard_move_type.is_none() {
        println!("\"Yard Move Zones\" zone type not found; showing regular zones only");
    }
    print_list(&snapshot.regular);
    println!();
    print_list(&snapshot.yard_move);
    println!();
    println!(
        "{} zones, {} yard move ({:.0}%)",
        snapshot.stats.total,
        snapshot.stats.yard_move,
        snapshot.stats.yard_move_share()
    );
}

fn print_list(list: &ListSnapshot) {
    if list.search.is_empty() {
        println!("{} ({})", list.title, list.total);
    } else {
        println!("{} ({} of {}, \"{}\")", list.title, list.rows.len(), list.total, list.search);
    }
    if list.rows.is_empty() {
        println!("  (none)");
    }
    for row in &list.rows {
        println!(
            "  {:<32} {:<12} {} types, {} points",
            row.name, row.id, row.zone_type_count, row.point_count
        );
    }
}
