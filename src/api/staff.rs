use super::client::ApiClient;
use super::ApiError;
use crate::models::{NewStaff, Staff};

/// Staff resource contract. Admin-only endpoints.
pub trait StaffGateway {
    fn list(&self) -> Result<Vec<Staff>, ApiError>;
    fn create(&self, new: &NewStaff) -> Result<Staff, ApiError>;
    fn update(&self, staff: &Staff) -> Result<Staff, ApiError>;
    fn remove(&self, id: i64) -> Result<(), ApiError>;
}

/// Real gateway over the clinic backend.
pub struct ApiStaff<'a> {
    client: &'a ApiClient,
}

impl<'a> ApiStaff<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl StaffGateway for ApiStaff<'_> {
    fn list(&self) -> Result<Vec<Staff>, ApiError> {
        self.client.get_list("/api/admin/staff")
    }

    fn create(&self, new: &NewStaff) -> Result<Staff, ApiError> {
        self.client.post("/api/admin/staff", new)
    }

    fn update(&self, staff: &Staff) -> Result<Staff, ApiError> {
        self.client
            .put(&format!("/api/admin/staff/{}", staff.id), staff)
    }

    fn remove(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/api/admin/staff/{id}"))
    }
}

/// In-memory gateway for tests and offline development.
pub struct MockStaff {
    items: std::sync::Mutex<Vec<Staff>>,
    next_id: std::sync::Mutex<i64>,
    fail: std::sync::atomic::AtomicBool,
}

impl Default for MockStaff {
    fn default() -> Self {
        Self::with_items(Vec::new())
    }
}

impl MockStaff {
    pub fn with_items(items: Vec<Staff>) -> Self {
        let next_id = items.iter().map(|s| s.id).max().unwrap_or(0) + 1;
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

impl StaffGateway for MockStaff {
    fn list(&self) -> Result<Vec<Staff>, ApiError> {
        self.check_fail()?;
        Ok(self.items.lock().unwrap().clone())
    }

    fn create(&self, new: &NewStaff) -> Result<Staff, ApiError> {
        self.check_fail()?;
        let mut next = self.next_id.lock().unwrap();
        let created = Staff {
            id: *next,
            name: new.name.clone(),
            email: new.email.clone(),
            role: new.role,
        };
        *next += 1;
        self.items.lock().unwrap().push(created.clone());
        Ok(created)
    }

    fn update(&self, staff: &Staff) -> Result<Staff, ApiError> {
        self.check_fail()?;
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|s| s.id == staff.id) {
            Some(existing) => {
                *existing = staff.clone();
                Ok(existing.clone())
            }
            None => Err(ApiError::NotFound(format!("staff {}", staff.id))),
        }
    }

    fn remove(&self, id: i64) -> Result<(), ApiError> {
        self.check_fail()?;
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|s| s.id != id);
        if items.len() == before {
            return Err(ApiError::NotFound(format!("staff {id}")));
        }
        Ok(())
    }
}
