use chrono::{DateTime, FixedOffset};

use crate::config::{LabelSet, ScoutConfig};
use crate::models::{Coordinate, MatchConfig, RallyEvent};
use crate::save::SaveError;

const BOM: &str = "\u{FEFF}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub labels: LabelSet,
    pub utc_offset_minutes: i32,
    pub include_bom: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { labels: LabelSet::english(), utc_offset_minutes: 0, include_bom: true }
    }
}

impl ExportOptions {
    pub fn from_config(config: &ScoutConfig) -> Self {
        Self {
            labels: config.labels.clone(),
            utc_offset_minutes: config.export.utc_offset_minutes,
            include_bom: config.export.include_bom,
        }
    }
}

/// One row per event, in the order given. Returns UTF-8 bytes.
pub fn export_csv<'a, I>(
    config: &MatchConfig,
    events: I,
    options: &ExportOptions,
) -> Result<Vec<u8>, SaveError>
where
    I: IntoIterator<Item = &'a RallyEvent>,
{
    let seconds = options.utc_offset_minutes.checked_mul(60);
    let offset = seconds.and_then(FixedOffset::east_opt).ok_or_else(|| {
        SaveError::Export(format!("UTC offset out of range: {} min", options.utc_offset_minutes))
    })?;

    let mut buf = Vec::new();
    if options.include_bom {
        buf.extend_from_slice(BOM.as_bytes());
    }

    let mut writer = csv::Writer::from_writer(buf);
    writer.write_record(&options.labels.header).map_err(export_err)?;

    let mut rows = 0usize;
    for event in events {
        writer.write_record(row(config, event, &options.labels, &offset)?).map_err(export_err)?;
        rows += 1;
    }

    let bytes = writer.into_inner().map_err(|e| SaveError::Export(e.to_string()))?;
    log::debug!("Exported {} rows ({} bytes)", rows, bytes.len());
    Ok(bytes)
}

fn row(
    config: &MatchConfig,
    event: &RallyEvent,
    labels: &LabelSet,
    offset: &FixedOffset,
) -> Result<[String; 15], SaveError> {
    let time = DateTime::from_timestamp_millis(event.recorded_at)
        .ok_or_else(|| SaveError::Export(format!("event {} has a bad timestamp", event.id)))?
        .with_timezone(offset)
        .format("%H:%M:%S")
        .to_string();

    let start = event.start;
    let end = event.end;

    Ok([
        time,
        event.set_number.to_string(),
        event.home_score.to_string(),
        event.away_score.to_string(),
        config.side_name(event.serving_side).to_string(),
        config.side_name(event.side).to_string(),
        event.position.to_string(),
        event.player_number.clone(),
        labels.action(event.action).to_string(),
        event.quality.symbol().to_string(),
        labels.result(event.result).to_string(),
        coord(start, |c| c.x),
        coord(start, |c| c.y),
        coord(end, |c| c.x),
        coord(end, |c| c.y),
    ])
}

fn coord(c: Option<Coordinate>, axis: impl Fn(&Coordinate) -> f64) -> String {
    c.map(|c| format!("{:.2}", axis(&c))).unwrap_or_default()
}

fn export_err(e: csv::Error) -> SaveError {
    SaveError::Export(e.to_string())
}
