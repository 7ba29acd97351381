//! HTTP-based [`Router`] using OSRM's Route API.
//!
//! # Example
//!
//! ```no_run
//! use curbside_core::{Coordinate, Router, RoutingOptions};
//! use curbside_data::routing::OsrmRouter;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let router = OsrmRouter::new("https://router.project-osrm.org")?;
//! let summary = router
//!     .route(
//!         Coordinate::new(28.63, -81.46)?,
//!         Coordinate::new(28.80, -81.27)?,
//!         RoutingOptions::avoiding_tolls(true),
//!     )
//!     .await?;
//! println!("{} m", summary.distance_meters);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use curbside_core::{
    Coordinate, RouteSummary, Router, RoutingError, RoutingOptions, TransportError,
};
use log::debug;
use reqwest::Client;

use super::osrm::RouteResponse;
use crate::http::{ClientBuildError, HttpServiceConfig};

/// OSRM status for an impossible route.
const NO_ROUTE_CODE: &str = "NoRoute";

/// Route service path for the driving profile.
const ROUTE_SERVICE_PATH: &str = "route/v1/driving";

/// Driving router backed by an OSRM server.
#[derive(Debug, Clone)]
pub struct OsrmRouter {
    client: Client,
    config: HttpServiceConfig,
}

impl OsrmRouter {
    /// Create a router for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not absolute or the HTTP client
    /// fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(HttpServiceConfig::new(base_url))
    }

    /// Create a router with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not absolute or the HTTP client
    /// fails to build.
    pub fn with_config(config: HttpServiceConfig) -> Result<Self, ClientBuildError> {
        config.endpoint_url(ROUTE_SERVICE_PATH)?;
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    /// Build the Route API URL.
    ///
    /// Coordinates are written `lon,lat` as OSRM expects.
    fn build_route_url(&self, from: Coordinate, to: Coordinate, options: RoutingOptions) -> String {
        let mut url = self.config.endpoint(&format!(
            "{ROUTE_SERVICE_PATH}/{},{};{},{}?overview=full&geometries=geojson",
            from.longitude(),
            from.latitude(),
            to.longitude(),
            to.latitude()
        ));
        if options.avoid_tolls {
            url.push_str("&exclude=toll");
        }
        url
    }

    /// Convert an OSRM response to a [`RouteSummary`].
    fn convert_response(
        response: RouteResponse,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<RouteSummary, RoutingError> {
        if response.code == NO_ROUTE_CODE {
            return Err(RoutingError::no_route(from, to));
        }
        if !response.is_ok() {
            return Err(TransportError::Service {
                code: response.code,
                message: response.message.unwrap_or_default(),
            }
            .into());
        }

        let Some(route) = response.routes.into_iter().next() else {
            return Err(RoutingError::no_route(from, to));
        };
        let summary = RouteSummary::new(route.distance, route.duration);
        let Some(geometry) = route.geometry else {
            return Ok(summary);
        };
        let path = geometry
            .coordinates
            .into_iter()
            .map(|[lon, lat]| Coordinate::new(lat, lon))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| TransportError::Parse {
                message: format!("invalid route geometry: {err}"),
            })?;
        Ok(summary.with_path(path))
    }
}

#[async_trait(?Send)]
impl Router for OsrmRouter {
    async fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
        options: RoutingOptions,
    ) -> Result<RouteSummary, RoutingError> {
        let url = self.build_route_url(from, to, options);
        debug!("requesting route {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.config.convert_reqwest_error(&err, &url))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.config.convert_reqwest_error(&err, &url))?;

        // OSRM reports `NoRoute` and query errors with a 400 and a JSON body,
        // so the body is decoded before the status is judged.
        match serde_json::from_str::<RouteResponse>(&body) {
            Ok(parsed) => Self::convert_response(parsed, from, to),
            Err(err) if status.is_success() => Err(TransportError::Parse {
                message: err.to_string(),
            }
            .into()),
            Err(_) => Err(TransportError::Http {
                url,
                status: status.as_u16(),
                message: status.to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::osrm::{LineGeometry, Route};
    use rstest::{fixture, rstest};

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("valid coordinate")
    }

    #[fixture]
    fn endpoints() -> (Coordinate, Coordinate) {
        (coord(28.63, -81.46), coord(28.8, -81.27))
    }

    fn ok_response(geometry: Option<Vec<[f64; 2]>>) -> RouteResponse {
        RouteResponse {
            code: "Ok".to_owned(),
            message: None,
            routes: vec![Route {
                distance: 19_795.2,
                duration: 1_502.4,
                geometry: geometry.map(|coordinates| LineGeometry { coordinates }),
            }],
        }
    }

    #[rstest]
    #[case("router.project-osrm.org")]
    #[case("/osrm")]
    fn relative_base_url_is_rejected_when_built(#[case] base_url: &str) {
        let err = OsrmRouter::new(base_url).expect_err("base url should be rejected");
        assert!(matches!(err, ClientBuildError::InvalidBaseUrl { .. }));
    }

    #[rstest]
    fn build_route_url_formats_lon_lat(endpoints: (Coordinate, Coordinate)) {
        let router = OsrmRouter::new("http://osrm.example.com").expect("router should build");
        let (from, to) = endpoints;

        let url = router.build_route_url(from, to, RoutingOptions::default());

        assert_eq!(
            url,
            "http://osrm.example.com/route/v1/driving/-81.46,28.63;-81.27,28.8?overview=full&geometries=geojson"
        );
    }

    #[rstest]
    fn build_route_url_excludes_tolls_on_request(endpoints: (Coordinate, Coordinate)) {
        let router = OsrmRouter::new("http://osrm.example.com/").expect("router should build");
        let (from, to) = endpoints;

        let url = router.build_route_url(from, to, RoutingOptions::avoiding_tolls(true));

        assert!(url.ends_with("&exclude=toll"));
        assert!(!url.contains("//route"));
    }

    #[rstest]
    fn convert_response_keeps_geometry(endpoints: (Coordinate, Coordinate)) {
        let (from, to) = endpoints;
        let response = ok_response(Some(vec![[-81.46, 28.63], [-81.27, 28.8]]));

        let summary = OsrmRouter::convert_response(response, from, to).expect("should parse");

        assert_eq!(summary.distance_meters, 19_795.2);
        assert_eq!(summary.duration_seconds, 1_502.4);
        assert_eq!(summary.path, Some(vec![from, to]));
    }

    #[rstest]
    fn convert_response_without_geometry(endpoints: (Coordinate, Coordinate)) {
        let (from, to) = endpoints;
        let summary =
            OsrmRouter::convert_response(ok_response(None), from, to).expect("should parse");
        assert!(summary.path.is_none());
    }

    #[rstest]
    fn convert_response_rejects_invalid_geometry(endpoints: (Coordinate, Coordinate)) {
        let (from, to) = endpoints;
        let response = ok_response(Some(vec![[-81.46, 128.63]]));

        let err = OsrmRouter::convert_response(response, from, to).expect_err("should fail");

        assert!(matches!(
            err,
            RoutingError::Transport(TransportError::Parse { .. })
        ));
    }

    #[rstest]
    #[case("NoRoute", Vec::new())]
    #[case("Ok", Vec::new())]
    fn missing_routes_mean_no_route(
        endpoints: (Coordinate, Coordinate),
        #[case] code: &str,
        #[case] routes: Vec<Route>,
    ) {
        let (from, to) = endpoints;
        let response = RouteResponse {
            code: code.to_owned(),
            message: None,
            routes,
        };

        let err = OsrmRouter::convert_response(response, from, to).expect_err("should fail");

        assert_eq!(err, RoutingError::no_route(from, to));
    }

    #[rstest]
    fn convert_response_handles_service_error(endpoints: (Coordinate, Coordinate)) {
        let (from, to) = endpoints;
        let response = RouteResponse {
            code: "InvalidQuery".to_owned(),
            message: Some("Query string malformed".to_owned()),
            routes: Vec::new(),
        };

        let err = OsrmRouter::convert_response(response, from, to).expect_err("should fail");

        match err {
            RoutingError::Transport(TransportError::Service { code, message }) => {
                assert_eq!(code, "InvalidQuery");
                assert_eq!(message, "Query string malformed");
            }
            other => panic!("expected a service error, got {other:?}"),
        }
    }
}
