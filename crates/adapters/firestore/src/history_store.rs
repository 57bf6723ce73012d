//! `HistoryStore` implementation over the append collections.
//!
//! Appends POST into the collection (server-assigned ids); queries go
//! through `:runQuery` filtered by plant, ordered newest first.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use sprout_app::ports::HistoryStore;
use sprout_domain::diagnosis::DiseaseStatus;
use sprout_domain::error::SproutError;
use sprout_domain::history::{
    DiseaseRecord, IdentificationRecord, MoistureRecord, TriggeredBy, WateringKind,
    WateringRecord, WateringStatus,
};
use sprout_domain::id::{PlantId, RecordId};
use sprout_domain::moisture::MoistureLevel;
use sprout_domain::time::Timestamp;

use crate::client::FirestoreClient;
use crate::error::FirestoreError;
use crate::value::{Document, Value};

const WATERINGS: &str = "watering_history";
const SENSOR_DATA: &str = "sensor_data";
const DISEASE_CHECKS: &str = "disease_checks";
const IDENTIFICATIONS: &str = "plant_identifications";

/// Firestore-backed history sink.
#[derive(Debug, Clone)]
pub struct FirestoreHistoryStore {
    client: Arc<FirestoreClient>,
}

impl FirestoreHistoryStore {
    /// Create a store sharing the given client.
    #[must_use]
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }

    async fn query(
        &self,
        collection: &str,
        plant_id: &PlantId,
        limit: usize,
        since: Option<Timestamp>,
    ) -> Result<Vec<Document>, FirestoreError> {
        let body = query_body(collection, plant_id, limit, since);
        self.client.run_query(&body).await
    }
}

fn query_body(
    collection: &str,
    plant_id: &PlantId,
    limit: usize,
    since: Option<Timestamp>,
) -> serde_json::Value {
    let plant_filter = serde_json::json!({
        "fieldFilter": {
            "field": {"fieldPath": "plant_id"},
            "op": "EQUAL",
            "value": {"stringValue": plant_id.as_str()},
        }
    });

    let filter = match since {
        Some(since) => serde_json::json!({
            "compositeFilter": {
                "op": "AND",
                "filters": [
                    plant_filter,
                    {
                        "fieldFilter": {
                            "field": {"fieldPath": "at"},
                            "op": "GREATER_THAN_OR_EQUAL",
                            "value": {"timestampValue": since.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)},
                        }
                    }
                ],
            }
        }),
        None => plant_filter,
    };

    serde_json::json!({
        "structuredQuery": {
            "from": [{"collectionId": collection}],
            "where": filter,
            "orderBy": [{"field": {"fieldPath": "at"}, "direction": "DESCENDING"}],
            "limit": limit,
        }
    })
}

fn record_id(doc: &Document) -> Result<RecordId, FirestoreError> {
    match doc.get_opt_str("record_id") {
        Some(id) => id
            .parse()
            .map_err(|_| FirestoreError::Decode(format!("bad record id `{id}`"))),
        None => Err(FirestoreError::Decode("missing record_id".to_string())),
    }
}

fn base_fields(record_id: RecordId, plant_id: &PlantId, at: Timestamp) -> BTreeMap<String, Value> {
    let mut fields = BTreeMap::new();
    fields.insert("record_id".into(), Value::string(record_id.to_string()));
    fields.insert("plant_id".into(), Value::string(plant_id.as_str()));
    fields.insert("at".into(), Value::timestamp(at));
    fields
}

fn watering_to_document(record: &WateringRecord) -> Document {
    let mut fields = base_fields(record.id, &record.plant_id, record.at);
    fields.insert(
        "kind".into(),
        Value::string(match record.kind {
            WateringKind::Manual => "manual",
            WateringKind::Automatic => "automatic",
        }),
    );
    fields.insert(
        "duration_seconds".into(),
        Value::integer(i64::from(record.duration_seconds)),
    );
    fields.insert(
        "triggered_by".into(),
        Value::string(match record.triggered_by {
            TriggeredBy::MobileApp => "mobile_app",
            TriggeredBy::Sensor => "sensor",
            TriggeredBy::Device => "device",
        }),
    );
    fields.insert(
        "status".into(),
        Value::string(match record.status {
            WateringStatus::Queued => "queued",
            WateringStatus::Completed => "completed",
        }),
    );
    Document::from_fields(fields)
}

fn watering_from_document(doc: &Document) -> Result<WateringRecord, FirestoreError> {
    let kind = match doc.get_str("kind")? {
        "manual" => WateringKind::Manual,
        "automatic" => WateringKind::Automatic,
        other => return Err(FirestoreError::Decode(format!("bad watering kind `{other}`"))),
    };
    let triggered_by = match doc.get_str("triggered_by")? {
        "mobile_app" => TriggeredBy::MobileApp,
        "sensor" => TriggeredBy::Sensor,
        "device" => TriggeredBy::Device,
        other => return Err(FirestoreError::Decode(format!("bad trigger `{other}`"))),
    };
    let status = match doc.get_str("status")? {
        "queued" => WateringStatus::Queued,
        "completed" => WateringStatus::Completed,
        other => return Err(FirestoreError::Decode(format!("bad status `{other}`"))),
    };
    Ok(WateringRecord {
        id: record_id(doc)?,
        plant_id: parse_plant_id(doc)?,
        kind,
        duration_seconds: parse_u32(doc, "duration_seconds")?,
        triggered_by,
        status,
        at: doc.get_timestamp("at")?,
    })
}

fn moisture_to_document(record: &MoistureRecord) -> Document {
    let mut fields = base_fields(record.id, &record.plant_id, record.at);
    fields.insert(
        "moisture".into(),
        Value::integer(i64::from(record.moisture_percent)),
    );
    fields.insert("level".into(), Value::string(record.level.as_str()));
    if let Some(temperature) = record.temperature_celsius {
        fields.insert("temperature".into(), Value::double(f64::from(temperature)));
    }
    if let Some(humidity) = record.humidity_percent {
        fields.insert("humidity".into(), Value::integer(i64::from(humidity)));
    }
    Document::from_fields(fields)
}

fn moisture_from_document(doc: &Document) -> Result<MoistureRecord, FirestoreError> {
    let level = match doc.get_str("level")? {
        "critical" => MoistureLevel::Critical,
        "low" => MoistureLevel::Low,
        "normal" => MoistureLevel::Normal,
        other => return Err(FirestoreError::Decode(format!("bad level `{other}`"))),
    };
    #[allow(clippy::cast_possible_truncation)]
    let temperature = doc.get_opt_f64("temperature").map(|value| value as f32);
    let humidity = match doc.get_opt_i64("humidity") {
        Some(value) => Some(
            u8::try_from(value)
                .map_err(|err| FirestoreError::Decode(err.to_string()))?,
        ),
        None => None,
    };
    Ok(MoistureRecord {
        id: record_id(doc)?,
        plant_id: parse_plant_id(doc)?,
        moisture_percent: parse_u8(doc, "moisture")?,
        level,
        temperature_celsius: temperature,
        humidity_percent: humidity,
        at: doc.get_timestamp("at")?,
    })
}

fn disease_to_document(record: &DiseaseRecord) -> Document {
    let mut fields = base_fields(record.id, &record.plant_id, record.at);
    if let Some(plant_type) = &record.plant_type {
        fields.insert("plant_type".into(), Value::string(plant_type));
    }
    fields.insert("status".into(), Value::string(record.status.as_str()));
    fields.insert(
        "confidence".into(),
        Value::double(f64::from(record.confidence)),
    );
    fields.insert("model".into(), Value::string(&record.model));
    Document::from_fields(fields)
}

fn disease_from_document(doc: &Document) -> Result<DiseaseRecord, FirestoreError> {
    let status = match doc.get_str("status")? {
        "healthy" => DiseaseStatus::Healthy,
        "diseased" => DiseaseStatus::Diseased,
        other => return Err(FirestoreError::Decode(format!("bad status `{other}`"))),
    };
    #[allow(clippy::cast_possible_truncation)]
    let confidence = doc.get_f64("confidence")? as f32;
    Ok(DiseaseRecord {
        id: record_id(doc)?,
        plant_id: parse_plant_id(doc)?,
        plant_type: doc.get_opt_str("plant_type").map(str::to_string),
        status,
        confidence,
        model: doc.get_str("model")?.to_string(),
        at: doc.get_timestamp("at")?,
    })
}

fn identification_to_document(record: &IdentificationRecord) -> Document {
    let mut fields = base_fields(record.id, &record.plant_id, record.at);
    let predictions = record
        .predictions
        .iter()
        .map(|prediction| {
            let mut entry = BTreeMap::new();
            entry.insert("plant_type".into(), Value::string(&prediction.plant_type));
            entry.insert(
                "confidence".into(),
                Value::double(f64::from(prediction.confidence)),
            );
            Value::map(entry)
        })
        .collect();
    fields.insert("predictions".into(), Value::array(predictions));
    fields.insert("model".into(), Value::string(&record.model));
    Document::from_fields(fields)
}

fn parse_plant_id(doc: &Document) -> Result<PlantId, FirestoreError> {
    PlantId::new(doc.get_str("plant_id")?).map_err(|err| FirestoreError::Decode(err.to_string()))
}

fn parse_u8(doc: &Document, field: &str) -> Result<u8, FirestoreError> {
    u8::try_from(doc.get_i64(field)?).map_err(|err| FirestoreError::Decode(err.to_string()))
}

fn parse_u32(doc: &Document, field: &str) -> Result<u32, FirestoreError> {
    u32::try_from(doc.get_i64(field)?).map_err(|err| FirestoreError::Decode(err.to_string()))
}

impl HistoryStore for FirestoreHistoryStore {
    fn record_watering(
        &self,
        record: WateringRecord,
    ) -> impl Future<Output = Result<WateringRecord, SproutError>> + Send {
        async move {
            self.client
                .create_document(WATERINGS, &watering_to_document(&record))
                .await?;
            Ok(record)
        }
    }

    fn record_moisture(
        &self,
        record: MoistureRecord,
    ) -> impl Future<Output = Result<MoistureRecord, SproutError>> + Send {
        async move {
            self.client
                .create_document(SENSOR_DATA, &moisture_to_document(&record))
                .await?;
            Ok(record)
        }
    }

    fn record_disease(
        &self,
        record: DiseaseRecord,
    ) -> impl Future<Output = Result<DiseaseRecord, SproutError>> + Send {
        async move {
            self.client
                .create_document(DISEASE_CHECKS, &disease_to_document(&record))
                .await?;
            Ok(record)
        }
    }

    fn record_identification(
        &self,
        record: IdentificationRecord,
    ) -> impl Future<Output = Result<IdentificationRecord, SproutError>> + Send {
        async move {
            self.client
                .create_document(IDENTIFICATIONS, &identification_to_document(&record))
                .await?;
            Ok(record)
        }
    }

    fn watering_history(
        &self,
        plant_id: PlantId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<WateringRecord>, SproutError>> + Send {
        async move {
            let documents = self.query(WATERINGS, &plant_id, limit, None).await?;
            documents
                .iter()
                .map(|doc| watering_from_document(doc).map_err(SproutError::from))
                .collect()
        }
    }

    fn moisture_history(
        &self,
        plant_id: PlantId,
        limit: usize,
        since: Timestamp,
    ) -> impl Future<Output = Result<Vec<MoistureRecord>, SproutError>> + Send {
        async move {
            let documents = self
                .query(SENSOR_DATA, &plant_id, limit, Some(since))
                .await?;
            documents
                .iter()
                .map(|doc| moisture_from_document(doc).map_err(SproutError::from))
                .collect()
        }
    }

    fn disease_history(
        &self,
        plant_id: PlantId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<DiseaseRecord>, SproutError>> + Send {
        async move {
            let documents = self.query(DISEASE_CHECKS, &plant_id, limit, None).await?;
            documents
                .iter()
                .map(|doc| disease_from_document(doc).map_err(SproutError::from))
                .collect()
        }
    }
}
