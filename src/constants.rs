//! Constants describing the GHCN-D file formats and default data layout.

/// Fixed-width layout of `ghcnd-stations.txt`
pub mod station_layout {
    /// Half-open byte range of a field within a station line
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FieldSpan {
        pub start: usize,
        pub end: usize,
    }

    impl FieldSpan {
        pub const fn new(start: usize, end: usize) -> Self {
            Self { start, end }
        }
    }

    pub const ID: FieldSpan = FieldSpan::new(0, 11);
    pub const LATITUDE: FieldSpan = FieldSpan::new(12, 20);
    pub const LONGITUDE: FieldSpan = FieldSpan::new(21, 30);
    pub const ELEVATION: FieldSpan = FieldSpan::new(31, 37);
    pub const STATE: FieldSpan = FieldSpan::new(38, 40);
    pub const NAME: FieldSpan = FieldSpan::new(41, 71);
    pub const GSN_FLAG: FieldSpan = FieldSpan::new(72, 75);
    pub const HCN_CRN_FLAG: FieldSpan = FieldSpan::new(76, 79);
    pub const WMO_ID: FieldSpan = FieldSpan::new(80, 85);
}

/// CSV column names shared by every output table
pub mod columns {
    pub const ID: &str = "ID";
    pub const LATITUDE: &str = "LATITUDE";
    pub const LONGITUDE: &str = "LONGITUDE";
    pub const ELEVATION: &str = "ELEVATION";
    pub const STATE: &str = "STATE";
    pub const NAME: &str = "NAME";
    pub const GSN_FLAG: &str = "GSN_FLAG";
    pub const HCN_CRN_FLAG: &str = "HCN_CRN_FLAG";
    pub const WMO_ID: &str = "WMO_ID";

    pub const COUNTRY_CODE_FIPS: &str = "COUNTRY_CODE_FIPS";
    pub const COUNTRY_NAME: &str = "COUNTRY_NAME";

    /// Station columns in output order
    pub const STATION_COLUMNS: [&str; 9] = [
        ID,
        LATITUDE,
        LONGITUDE,
        ELEVATION,
        STATE,
        NAME,
        GSN_FLAG,
        HCN_CRN_FLAG,
        WMO_ID,
    ];

    pub const COUNTRY_COLUMNS: [&str; 2] = [COUNTRY_CODE_FIPS, COUNTRY_NAME];
}

/// Flag value marking a Global Climate Observing System Network station
pub const GSN_FLAG_VALUE: &str = "GSN";

/// Number of leading id characters that form the FIPS country code
pub const COUNTRY_CODE_LEN: usize = 2;

/// Rows shown after each table is written
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Default data layout relative to the data directory
pub mod default_paths {
    pub const DATA_DIR: &str = "data";

    pub const STATIONS_TXT: &str = "raw/ghcnd-stations.txt";
    pub const STATIONS_CSV: &str = "interim/ghcnd_stations.csv";
    pub const COUNTRIES_TXT: &str = "raw/ghcnd-countries.txt";
    pub const COUNTRIES_CSV: &str = "interim/ghcnd_countries.csv";
    pub const COMBINED_CSV: &str = "interim/stations_with_country_names.csv";
    pub const GSN_CSV: &str = "interim/gsn_stations.csv";
    pub const GSOY_DIR: &str = "raw/gsoy_data";
    pub const GSOY_CSV: &str = "processed/unified_countries.csv";
}
