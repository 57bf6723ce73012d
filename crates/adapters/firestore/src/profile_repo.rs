//! `ProfileRepository` implementation over the `plant_profiles` collection.
//!
//! One document per plant, keyed by the plant id. Settings are flattened
//! into the document the way the mobile client historically read them.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use sprout_app::ports::ProfileRepository;
use sprout_domain::error::SproutError;
use sprout_domain::id::PlantId;
use sprout_domain::profile::{PlantProfile, PlantSettings};

use crate::client::FirestoreClient;
use crate::error::FirestoreError;
use crate::value::{Document, Value};

const COLLECTION: &str = "plant_profiles";

/// Firestore-backed profile store.
#[derive(Debug, Clone)]
pub struct FirestoreProfileRepository {
    client: Arc<FirestoreClient>,
}

impl FirestoreProfileRepository {
    /// Create a repository sharing the given client.
    #[must_use]
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }
}

fn to_document(profile: &PlantProfile) -> Document {
    let mut fields = BTreeMap::new();
    fields.insert("plant_id".into(), Value::string(profile.plant_id.as_str()));
    fields.insert("plant_name".into(), Value::string(&profile.plant_name));
    fields.insert("plant_type".into(), Value::string(&profile.plant_type));
    fields.insert("location".into(), Value::string(&profile.location));
    fields.insert("notes".into(), Value::string(&profile.notes));
    fields.insert(
        "moisture_threshold".into(),
        Value::integer(i64::from(profile.settings.moisture_threshold)),
    );
    fields.insert(
        "auto_watering".into(),
        Value::boolean(profile.settings.auto_watering),
    );
    fields.insert(
        "notification_enabled".into(),
        Value::boolean(profile.settings.notification_enabled),
    );
    fields.insert(
        "watering_duration".into(),
        Value::integer(i64::from(profile.settings.watering_duration)),
    );
    fields.insert("created_at".into(), Value::timestamp(profile.created_at));
    fields.insert("updated_at".into(), Value::timestamp(profile.updated_at));
    Document::from_fields(fields)
}

fn from_document(doc: &Document) -> Result<PlantProfile, FirestoreError> {
    let plant_id = PlantId::new(doc.get_str("plant_id")?)
        .map_err(|err| FirestoreError::Decode(err.to_string()))?;
    let settings = PlantSettings {
        moisture_threshold: u8::try_from(doc.get_i64("moisture_threshold")?)
            .map_err(|err| FirestoreError::Decode(err.to_string()))?,
        auto_watering: doc.get_bool("auto_watering")?,
        notification_enabled: doc.get_bool("notification_enabled")?,
        watering_duration: u32::try_from(doc.get_i64("watering_duration")?)
            .map_err(|err| FirestoreError::Decode(err.to_string()))?,
    };
    Ok(PlantProfile {
        plant_id,
        plant_name: doc.get_str("plant_name")?.to_string(),
        plant_type: doc.get_str("plant_type")?.to_string(),
        location: doc.get_str("location")?.to_string(),
        notes: doc.get_str("notes")?.to_string(),
        settings,
        created_at: doc.get_timestamp("created_at")?,
        updated_at: doc.get_timestamp("updated_at")?,
    })
}

impl ProfileRepository for FirestoreProfileRepository {
    fn get(
        &self,
        plant_id: PlantId,
    ) -> impl Future<Output = Result<Option<PlantProfile>, SproutError>> + Send {
        async move {
            let path = format!("{COLLECTION}/{plant_id}");
            let document = self.client.get_document(&path).await?;
            match document {
                Some(doc) => Ok(Some(from_document(&doc)?)),
                None => Ok(None),
            }
        }
    }

    fn upsert(
        &self,
        profile: PlantProfile,
    ) -> impl Future<Output = Result<PlantProfile, SproutError>> + Send {
        async move {
            let path = format!("{COLLECTION}/{}", profile.plant_id);
            self.client.set_document(&path, &to_document(&profile)).await?;
            Ok(profile)
        }
    }
}
