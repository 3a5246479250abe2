//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Load `days` of forecast for `city`, tagged with request generation `seq`
    FetchForecast { seq: u64, city: String, days: u8 },
    /// Look up locations matching `query`; debounced unless `immediate`
    SearchLocations {
        seq: u64,
        query: String,
        immediate: bool,
    },
    /// Drop any pending debounced lookup
    CancelSearch,
}
