use super::client::{role_prefix, ApiClient};
use super::ApiError;
use crate::models::{Patient, Role};

/// Patient resource contract. Screens depend on this trait, not on
/// inline fetch calls.
pub trait PatientsGateway {
    fn list(&self) -> Result<Vec<Patient>, ApiError>;
    /// Returns the server-assigned entity, including the generated id.
    fn create(&self, patient: &Patient) -> Result<Patient, ApiError>;
    fn update(&self, patient: &Patient) -> Result<Patient, ApiError>;
    fn remove(&self, id: i64) -> Result<(), ApiError>;

    /// Remove, treating an already-removed entity as success. Callers
    /// re-filter local state either way, so a 404 here changes nothing.
    fn remove_or_gone(&self, id: i64) -> Result<(), ApiError> {
        match self.remove(id) {
            Err(ApiError::NotFound(_)) => Ok(()),
            other => other,
        }
    }
}

/// Real gateway over the clinic backend.
pub struct ApiPatients<'a> {
    client: &'a ApiClient,
    prefix: &'static str,
}

impl<'a> ApiPatients<'a> {
    pub fn new(client: &'a ApiClient, role: Role) -> Self {
        Self {
            client,
            prefix: role_prefix(role),
        }
    }
}

impl PatientsGateway for ApiPatients<'_> {
    fn list(&self) -> Result<Vec<Patient>, ApiError> {
        self.client.get_list(&format!("{}/patients", self.prefix))
    }

    fn create(&self, patient: &Patient) -> Result<Patient, ApiError> {
        self.client.post("/api/patients", patient)
    }

    fn update(&self, patient: &Patient) -> Result<Patient, ApiError> {
        // A placeholder id marks "not yet created": it may only go to
        // the create endpoint.
        if patient.is_placeholder() {
            return Err(ApiError::Validation(
                "Cannot update a patient that has not been created yet".into(),
            ));
        }
        self.client
            .put(&format!("/api/patients/{}", patient.id), patient)
    }

    fn remove(&self, id: i64) -> Result<(), ApiError> {
        if id == crate::models::PLACEHOLDER_ID {
            return Err(ApiError::Validation(
                "Cannot delete a patient that has not been created yet".into(),
            ));
        }
        self.client.delete(&format!("/api/patients/{id}"))
    }
}

/// In-memory gateway for tests and offline development.
pub struct MockPatients {
    items: std::sync::Mutex<Vec<Patient>>,
    next_id: std::sync::Mutex<i64>,
    fail: std::sync::atomic::AtomicBool,
}

impl Default for MockPatients {
    fn default() -> Self {
        Self::with_items(Vec::new())
    }
}

impl MockPatients {
    pub fn with_items(items: Vec<Patient>) -> Self {
        let next_id = items.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            items: std::sync::Mutex::new(items),
            next_id: std::sync::Mutex::new(next_id),
            fail: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with a network error.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, std::sync::atomic::Ordering::Relaxed);
    }

    fn check_fail(&self) -> Result<(), ApiError> {
        if self.fail.load(std::sync::atomic::Ordering::Relaxed) {
            Err(ApiError::Network("mock failure".into()))
        } else {
            Ok(())
        }
    }
}

impl PatientsGateway for MockPatients {
    fn list(&self) -> Result<Vec<Patient>, ApiError> {
        self.check_fail()?;
        Ok(self.items.lock().unwrap().clone())
    }

    fn create(&self, patient: &Patient) -> Result<Patient, ApiError> {
        self.check_fail()?;
        let mut created = patient.clone();
        let mut next = self.next_id.lock().unwrap();
        created.id = *next;
        *next += 1;
        self.items.lock().unwrap().push(created.clone());
        Ok(created)
    }

    fn update(&self, patient: &Patient) -> Result<Patient, ApiError> {
        self.check_fail()?;
        if patient.is_placeholder() {
            return Err(ApiError::Validation("placeholder id".into()));
        }
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|p| p.id == patient.id) {
            Some(existing) => {
                *existing = patient.clone();
                Ok(patient.clone())
            }
            None => Err(ApiError::NotFound(format!("patient {}", patient.id))),
        }
    }

    fn remove(&self, id: i64) -> Result<(), ApiError> {
        self.check_fail()?;
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|p| p.id != id);
        if items.len() == before {
            return Err(ApiError::NotFound(format!("patient {id}")));
        }
        Ok(())
    }
}
