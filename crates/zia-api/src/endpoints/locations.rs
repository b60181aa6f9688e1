// Location endpoints

use tracing::debug;

use crate::client::{ZiaClient, find_by_name};
use crate::error::Error;
use crate::models::{Location, LocationGroup};

impl ZiaClient {
    /// `GET /locations` (paginated)
    pub async fn list_locations(&self) -> Result<Vec<Location>, Error> {
        self.get_all_pages("locations", &[]).await
    }

    /// Lightweight listing (ID and name only).
    ///
    /// `GET /locations/lite`
    pub async fn list_locations_lite(&self) -> Result<Vec<Location>, Error> {
        self.get_all_pages("locations/lite", &[]).await
    }

    /// `GET /locations/{id}`
    pub async fn get_location(&self, id: i64) -> Result<Location, Error> {
        self.get(&format!("locations/{id}")).await
    }

    /// Find a location by name using the server-side `search` filter.
    pub async fn get_location_by_name(&self, name: &str) -> Result<Location, Error> {
        let params = [("search", name.to_owned())];
        let matches: Vec<Location> = self.get_all_pages("locations", &params).await?;
        find_by_name(matches, name, |l| l.name.as_str(), "location")
    }

    /// `POST /locations`
    pub async fn create_location(&self, location: &Location) -> Result<Location, Error> {
        debug!(name = %location.name, "creating location");
        self.post("locations", location).await
    }

    /// `PUT /locations/{id}`
    pub async fn update_location(&self, id: i64, location: &Location) -> Result<Location, Error> {
        debug!(id, "updating location");
        self.put(&format!("locations/{id}"), location).await
    }

    /// `DELETE /locations/{id}`
    pub async fn delete_location(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting location");
        self.delete(&format!("locations/{id}")).await
    }

    // ── Location groups ──────────────────────────────────────────────

    /// `GET /locations/groups` (paginated)
    pub async fn list_location_groups(&self) -> Result<Vec<LocationGroup>, Error> {
        self.get_all_pages("locations/groups", &[]).await
    }

    /// `GET /locations/groups/{id}`
    pub async fn get_location_group(&self, id: i64) -> Result<LocationGroup, Error> {
        self.get(&format!("locations/groups/{id}")).await
    }

    pub async fn get_location_group_by_name(&self, name: &str) -> Result<LocationGroup, Error> {
        let groups = self.list_location_groups().await?;
        find_by_name(groups, name, |g| g.name.as_str(), "location group")
    }
}
