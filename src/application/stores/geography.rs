//! Geography hierarchy: global market, country, region, city, district, channel, outlet.

use std::sync::Arc;

use super::ResourceStore;
use crate::application::pipeline::RequestPipeline;
use crate::domain::entities::ResourceId;
use crate::domain::entities::resources::{
    City, Country, District, GeoChannel, GlobalMarket, Outlet, Region,
};

/// One store per geography collection.
pub struct GeographyStores {
    pub global_markets: ResourceStore<GlobalMarket>,
    pub countries: ResourceStore<Country>,
    pub regions: ResourceStore<Region>,
    pub cities: ResourceStore<City>,
    pub districts: ResourceStore<District>,
    pub channels: ResourceStore<GeoChannel>,
    pub outlets: ResourceStore<Outlet>,
}

impl GeographyStores {
    #[must_use]
    pub fn new(pipeline: &Arc<RequestPipeline>, api_version: &str) -> Self {
        Self {
            global_markets: ResourceStore::new(Arc::clone(pipeline), api_version),
            countries: ResourceStore::new(Arc::clone(pipeline), api_version),
            regions: ResourceStore::new(Arc::clone(pipeline), api_version),
            cities: ResourceStore::new(Arc::clone(pipeline), api_version),
            districts: ResourceStore::new(Arc::clone(pipeline), api_version),
            channels: ResourceStore::new(Arc::clone(pipeline), api_version),
            outlets: ResourceStore::new(Arc::clone(pipeline), api_version),
        }
    }
}

impl ResourceStore<Country> {
    #[must_use]
    pub fn by_global_market(&self, global_market: &ResourceId) -> Vec<Country> {
        self.filter(|c| c.global_market.as_ref() == Some(global_market))
    }
}

impl ResourceStore<Region> {
    #[must_use]
    pub fn by_country(&self, country: &ResourceId) -> Vec<Region> {
        self.filter(|r| r.country.as_ref() == Some(country))
    }
}

impl ResourceStore<City> {
    #[must_use]
    pub fn by_region(&self, region: &ResourceId) -> Vec<City> {
        self.filter(|c| c.region.as_ref() == Some(region))
    }
}

impl ResourceStore<District> {
    #[must_use]
    pub fn by_city(&self, city: &ResourceId) -> Vec<District> {
        self.filter(|d| d.city.as_ref() == Some(city))
    }
}

impl ResourceStore<GeoChannel> {
    #[must_use]
    pub fn by_district(&self, district: &ResourceId) -> Vec<GeoChannel> {
        self.filter(|c| c.district.as_ref() == Some(district))
    }
}

impl ResourceStore<Outlet> {
    #[must_use]
    pub fn by_channel(&self, channel: &ResourceId) -> Vec<Outlet> {
        self.filter(|o| o.channel.as_ref() == Some(channel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::stores::ListQuery;
    use crate::application::stores::test_support::{pipeline_answering, ok};
    use serde_json::json;

    #[tokio::test]
    async fn test_regions_by_country() {
        let pipeline = pipeline_answering(vec![ok(json!([
            {"id": 1, "name": "Almaty Region", "country": 7},
            {"id": 2, "name": "Tashkent Region", "country": 8},
            {"id": 3, "name": "Akmola Region", "country": 7}
        ]))]);
        let geography = GeographyStores::new(&pipeline, "v1");
        geography.regions.fetch_list(&ListQuery::new()).await.unwrap();

        let regions = geography.regions.by_country(&ResourceId::Int(7));

        let names: Vec<_> = regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Almaty Region", "Akmola Region"]);
        assert!(geography.regions.by_country(&ResourceId::Int(99)).is_empty());
    }

    #[tokio::test]
    async fn test_outlets_by_channel_skips_unassigned() {
        let pipeline = pipeline_answering(vec![ok(json!([
            {"id": 1, "name": "Kiosk 1", "channel": 4},
            {"id": 2, "name": "Kiosk 2"}
        ]))]);
        let geography = GeographyStores::new(&pipeline, "v1");
        geography.outlets.fetch_list(&ListQuery::new()).await.unwrap();

        assert_eq!(geography.outlets.by_channel(&ResourceId::Int(4)).len(), 1);
    }
}
