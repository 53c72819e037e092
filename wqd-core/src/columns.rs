/// Parameter (analyte) name column.
pub const PARAM_NAME: &str = "ParamName";
/// Site display name column.
pub const SITE_NAME: &str = "Name";
/// Sample date column for water-quality exports.
pub const START_DATE: &str = "Start_Date";
/// Measured value column for water-quality exports.
pub const RESULT_VALUE: &str = "Result_Value";
/// Date column for gage exports.
pub const GAGE_DATE: &str = "Date";
/// Value column for gage exports.
pub const GAGE_VALUE: &str = "Value";
pub const STATION_ID: &str = "Station_ID";
pub const LATITUDE: &str = "Lat";
pub const LONGITUDE: &str = "Long";
pub const DEPTH_QUAL: &str = "Depth_Qual";
pub const ORGANIZATION: &str = "Organization_Name";

/// Names of the CSV columns the pipeline reads. Matching is exact and
/// case-sensitive; every other column is carried along and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    pub param: String,
    pub site: String,
    pub date: String,
    pub value: String,
    pub station_id: String,
    pub latitude: String,
    pub longitude: String,
    pub depth_qual: String,
    pub organization: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            param: PARAM_NAME.to_string(),
            site: SITE_NAME.to_string(),
            date: START_DATE.to_string(),
            value: RESULT_VALUE.to_string(),
            station_id: STATION_ID.to_string(),
            latitude: LATITUDE.to_string(),
            longitude: LONGITUDE.to_string(),
            depth_qual: DEPTH_QUAL.to_string(),
            organization: ORGANIZATION.to_string(),
        }
    }
}

impl Columns {
    /// Column layout of a single-series gage export (`Date`, `Value`).
    pub fn gage() -> Self {
        Self {
            date: GAGE_DATE.to_string(),
            value: GAGE_VALUE.to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gage_columns_only_swap_date_and_value() {
        let gage = Columns::gage();
        let default = Columns::default();
        assert_eq!(gage.date, "Date");
        assert_eq!(gage.value, "Value");
        assert_eq!(gage.param, default.param);
        assert_eq!(gage.station_id, default.station_id);
    }
}
