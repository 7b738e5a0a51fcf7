// lib/src/storage_engine/record_storage.rs
use async_trait::async_trait;
use sled::Transactional;

use models::medical::{MedicalRecord, NewMedicalRecord};

use crate::errors::Result;
use crate::storage_engine::sled_storage::{SledStorage, MEDICAL_RECORDS};
use crate::storage_engine::storage_utils::{
    allocate_id, id_key, scan_rows, tx_encode, tx_require, tx_result,
};

#[async_trait]
pub trait RecordStorageEngine: Send + Sync + 'static {
    async fn add_medical_record(&self, new: NewMedicalRecord) -> Result<MedicalRecord>;
    /// A user's records, newest `date` first.
    async fn list_medical_records_for_user(&self, user_id: u64) -> Result<Vec<MedicalRecord>>;
}

#[async_trait]
impl RecordStorageEngine for SledStorage {
    async fn add_medical_record(&self, new: NewMedicalRecord) -> Result<MedicalRecord> {
        new.validate()?;
        let result = (&self.medical_records, &self.users, &self.counters).transaction(
            |(records, users, counters)| {
                tx_require(users, "user", new.user_id)?;
                let id = allocate_id(counters, MEDICAL_RECORDS)?;
                let record = MedicalRecord::from_new(id, new.clone());
                records.insert(id_key(id).to_vec(), tx_encode(&record)?)?;
                Ok(record)
            },
        );
        tx_result(result)
    }

    async fn list_medical_records_for_user(&self, user_id: u64) -> Result<Vec<MedicalRecord>> {
        let mut records: Vec<MedicalRecord> = scan_rows::<MedicalRecord>(&self.medical_records)?
            .into_iter()
            .filter(|record| record.user_id == user_id)
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;
    use crate::storage_engine::UserStorageEngine;
    use models::medical::{parse_appointment_date, NewUser};

    fn record(user_id: u64, title: &str, date: &str) -> NewMedicalRecord {
        NewMedicalRecord {
            user_id,
            record_type: "test_result".to_string(),
            title: title.to_string(),
            description: None,
            doctor_name: Some("Dr. Kim".to_string()),
            date: parse_appointment_date(date).unwrap(),
            file_url: None,
        }
    }

    #[tokio::test]
    async fn records_are_scoped_and_newest_first() {
        let store = SledStorage::temporary().unwrap();
        let mut ids = Vec::new();
        for name in ["eve", "finn"] {
            let user = store
                .create_user(NewUser {
                    username: name.to_string(),
                    email: format!("{}@example.com", name),
                    password_hash: "hash".to_string(),
                    is_admin: false,
                })
                .await
                .unwrap();
            ids.push(user.id);
        }
        store.add_medical_record(record(ids[0], "Blood test", "2026-01-10T09:00")).await.unwrap();
        store.add_medical_record(record(ids[0], "X-ray", "2026-03-02T11:00")).await.unwrap();
        store.add_medical_record(record(ids[1], "Allergy panel", "2026-02-01T08:00")).await.unwrap();

        let titles: Vec<String> = store
            .list_medical_records_for_user(ids[0])
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["X-ray", "Blood test"]);
    }

    #[tokio::test]
    async fn record_requires_existing_user() {
        let store = SledStorage::temporary().unwrap();
        let err = store
            .add_medical_record(record(3, "Orphan", "2026-01-01T00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingReference { table: "user", id: 3 }));
    }
}
