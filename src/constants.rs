pub mod cache {

    /// Offset applied on both sides of the staleness comparison
    /// (`inserted_at + offset < now - offset`), so the effective age threshold is
    /// twice this value.
    pub const STALENESS_OFFSET_MINUTES: i64 = 60;

    /// One week.
    pub const MAX_STALENESS_OFFSET_MINUTES: i64 = 7 * 24 * 60;

    pub const FETCH_TIMEOUT_SECONDS: u64 = 20;
}

pub mod limits {

    pub const DEFAULT_TRENDS_NUMBER: u32 = 5;

    pub const MAX_TRENDS_NUMBER: u32 = 50;

    pub const MAX_WORD_LENGTH: usize = 100;
}

pub mod youtube {

    pub const DEFAULT_TREND_TYPE: &str = "Default";

    /// Category id 0 requests the unfiltered chart.
    pub const TREND_TYPES: &[(&str, i32)] = &[
        ("Default", 0),
        ("Film & Animation", 1),
        ("Music", 10),
        ("Sports", 17),
        ("Gaming", 20),
        ("Entertainment", 24),
        ("News & Politics", 25),
        ("Science & Technology", 28),
    ];
}

pub mod countries {

    pub const WORLDWIDE_ACRONYM: &str = "WW";
}
