use super::client::ApiClient;
use super::ApiError;
use crate::models::{NewReport, Report};

/// Report resource contract. Reports are append-only from the client's
/// perspective: create and list, no edit or delete.
pub trait ReportsGateway {
    fn list(&self) -> Result<Vec<Report>, ApiError>;
    fn create(&self, new: &NewReport) -> Result<Report, ApiError>;
}

/// Real gateway over the clinic backend.
pub struct ApiReports<'a> {
    client: &'a ApiClient,
}

impl<'a> ApiReports<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl ReportsGateway for ApiReports<'_> {
    fn list(&self) -> Result<Vec<Report>, ApiError> {
        self.client.get_list("/api/reports")
    }

    fn create(&self, new: &NewReport) -> Result<Report, ApiError> {
        self.client.post("/api/reports", new)
    }
}

/// In-memory gateway for tests.
#[derive(Default)]
pub struct MockReports {
    items: std::sync::Mutex<Vec<Report>>,
}

impl MockReports {
    pub fn created(&self) -> Vec<Report> {
        self.items.lock().unwrap().clone()
    }
}

impl ReportsGateway for MockReports {
    fn list(&self) -> Result<Vec<Report>, ApiError> {
        Ok(self.items.lock().unwrap().clone())
    }

    fn create(&self, new: &NewReport) -> Result<Report, ApiError> {
        let mut items = self.items.lock().unwrap();
        let report = Report {
            id: items.len() as i64 + 1,
            patient_id: new.patient_id,
            appointment_id: new.appointment_id,
            content: new.content.clone(),
        };
        items.push(report.clone());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_reports_are_listed_in_order() {
        let gateway = MockReports::default();
        gateway
            .create(&NewReport::for_patient(9, "first visit"))
            .unwrap();
        gateway
            .create(&NewReport::for_appointment(9, 4, "follow-up"))
            .unwrap();

        let listed = gateway.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].appointment_id, Some(4));
    }
}
