//! Registered vehicles

use crate::core::field::FieldFormat;
use crate::core::validation::{EntityValidationConfig, Validate, filters, validators};
use crate::entities::verification_label;
use crate::impl_record;
use chrono::{DateTime, Utc};
use uuid::Uuid;

impl_record!(
    /// A vehicle registered by a user for auto coverage
    Vehicle, "vehicles", "vehicle", VehicleField,
    {
        id: Uuid => Id,
        user_id: Uuid => UserId,
        make: String => Make,
        model: String => Model,
        year: i32 => Year,
        vin: String => Vin,
        license_plate: String => LicensePlate,
        verified: bool => Verified,
        created_at: DateTime<Utc> => CreatedAt,
    },
    search: [Make, Model, Vin, LicensePlate],
    date: CreatedAt,
    status: |vehicle| verification_label(vehicle.verified)
);

impl Vehicle {
    pub fn new(
        user_id: Uuid,
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        vin: impl Into<String>,
        license_plate: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            make: make.into(),
            model: model.into(),
            year,
            vin: vin.into(),
            license_plate: license_plate.into(),
            verified: false,
            created_at: Utc::now(),
        }
    }
}

impl Validate for Vehicle {
    fn validation_config() -> EntityValidationConfig {
        EntityValidationConfig::new("vehicle")
            .filter("make", filters::trim())
            .filter("model", filters::trim())
            .filter("vin", filters::trim())
            .filter("vin", filters::uppercase())
            .filter("license_plate", filters::trim())
            .filter("license_plate", filters::uppercase())
            .validate("make", validators::required())
            .validate("model", validators::required())
            .validate("year", validators::range(1980.0, 2100.0))
            .validate("vin", validators::required())
            .validate("vin", validators::format(FieldFormat::Vin))
            .validate("license_plate", validators::required())
            .validate("license_plate", validators::string_length(2, 10))
    }
}
