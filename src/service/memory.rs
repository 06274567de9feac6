use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::user_activity::{UserActivity, UserActivityDO};
use crate::service::{ActivityService, NewRegistration};

struct StoredActivity {
    record: UserActivity,
    certificate: Option<Vec<u8>>,
}

struct Store {
    next_id: i32,
    records: BTreeMap<i32, StoredActivity>,
}

// In-memory mirror of the Postgres service, keeping the same duplicate and
// not-found semantics. The handler tests run against this.
pub struct InMemoryActivityService {
    store: RwLock<Store>,
}

impl InMemoryActivityService {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                next_id: 1,
                records: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryActivityService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActivityService for InMemoryActivityService {
    async fn get_user_activity_by_id(&self, id: i32) -> Result<UserActivity, AppError> {
        let store = self.store.read().await;
        store
            .records
            .get(&id)
            .map(|stored| stored.record.clone())
            .ok_or_else(|| AppError::NotFound(format!("UserActivity: {} not found", id)))
    }

    async fn get_all_user_activities(&self) -> Result<Vec<UserActivity>, AppError> {
        let store = self.store.read().await;
        Ok(store
            .records
            .values()
            .map(|stored| stored.record.clone())
            .collect())
    }

    async fn user_register_to_learning_activity(
        &self,
        payload: &UserActivityDO,
    ) -> Result<UserActivity, AppError> {
        let registration = NewRegistration::from_payload(payload)?;

        let mut store = self.store.write().await;
        let duplicate = store.records.values().any(|stored| {
            stored.record.user_email == registration.user_email
                && stored.record.activity_name == registration.activity_name
        });
        if duplicate {
            return Err(AppError::Conflict(format!(
                "User {} is already registered to activity {}",
                registration.user_email, registration.activity_name
            )));
        }

        let id = store.next_id;
        store.next_id += 1;
        let record = UserActivity {
            id,
            user_name: registration.user_name,
            user_email: registration.user_email,
            activity_name: registration.activity_name,
            activity_type: registration.activity_type,
            registration_date: registration.registration_date,
            certificate_name: None,
        };
        store.records.insert(
            id,
            StoredActivity {
                record: record.clone(),
                certificate: None,
            },
        );
        Ok(record)
    }

    async fn delete_user_activity_by_id(&self, id: i32) -> Result<u64, AppError> {
        let mut store = self.store.write().await;
        Ok(if store.records.remove(&id).is_some() { 1 } else { 0 })
    }

    async fn upload_certificate(
        &self,
        file_name: &str,
        data: Vec<u8>,
        id: i32,
    ) -> Result<bool, AppError> {
        let mut store = self.store.write().await;
        match store.records.get_mut(&id) {
            Some(stored) => {
                stored.record.certificate_name = Some(file_name.to_string());
                stored.certificate = Some(data);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_certificate_name_by_id(&self, id: i32) -> Result<String, AppError> {
        let store = self.store.read().await;
        let stored = store
            .records
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("UserActivity: {} not found", id)))?;
        stored.record.certificate_name.clone().ok_or_else(|| {
            AppError::NotFound(format!("No certificate uploaded for UserActivity: {}", id))
        })
    }

    async fn get_certificate_by_id(&self, id: i32) -> Result<Vec<u8>, AppError> {
        let store = self.store.read().await;
        let stored = store
            .records
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("UserActivity: {} not found", id)))?;
        stored.certificate.clone().ok_or_else(|| {
            AppError::NotFound(format!("No certificate uploaded for UserActivity: {}", id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user_activity::UserActivityDO;

    fn payload(email: &str, activity: &str) -> UserActivityDO {
        UserActivityDO {
            user_name: Some("Alex Doe".to_string()),
            user_email: Some(email.to_string()),
            activity_name: Some(activity.to_string()),
            activity_type: Some("e-learning".to_string()),
            registration_date: Some("2024-03-01T09:30:00Z".to_string()),
        }
    }

    #[tokio::test]
    async fn register_assigns_sequential_ids() {
        let service = InMemoryActivityService::new();
        let first = service
            .user_register_to_learning_activity(&payload("a@example.com", "Course A"))
            .await
            .unwrap();
        let second = service
            .user_register_to_learning_activity(&payload("a@example.com", "Course B"))
            .await
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn duplicate_registration_is_a_conflict() {
        let service = InMemoryActivityService::new();
        service
            .user_register_to_learning_activity(&payload("a@example.com", "Course A"))
            .await
            .unwrap();
        let err = service
            .user_register_to_learning_activity(&payload("a@example.com", "Course A"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn invalid_registration_date_is_rejected() {
        let service = InMemoryActivityService::new();
        let mut bad = payload("a@example.com", "Course A");
        bad.registration_date = Some("yesterday".to_string());
        let err = service
            .user_register_to_learning_activity(&bad)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn delete_reports_rows_affected() {
        let service = InMemoryActivityService::new();
        let created = service
            .user_register_to_learning_activity(&payload("a@example.com", "Course A"))
            .await
            .unwrap();
        assert_eq!(service.delete_user_activity_by_id(created.id).await.unwrap(), 1);
        assert_eq!(service.delete_user_activity_by_id(created.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn certificate_round_trip() {
        let service = InMemoryActivityService::new();
        let created = service
            .user_register_to_learning_activity(&payload("a@example.com", "Course A"))
            .await
            .unwrap();

        let uploaded = service
            .upload_certificate("cert.pdf", b"%PDF-1.4 data".to_vec(), created.id)
            .await
            .unwrap();
        assert!(uploaded);

        assert_eq!(
            service.get_certificate_name_by_id(created.id).await.unwrap(),
            "cert.pdf"
        );
        assert_eq!(
            service.get_certificate_by_id(created.id).await.unwrap(),
            b"%PDF-1.4 data".to_vec()
        );
    }

    #[tokio::test]
    async fn certificate_lookup_without_upload_is_not_found() {
        let service = InMemoryActivityService::new();
        let created = service
            .user_register_to_learning_activity(&payload("a@example.com", "Course A"))
            .await
            .unwrap();
        let err = service.get_certificate_name_by_id(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
