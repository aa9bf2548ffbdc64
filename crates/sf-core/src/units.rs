// sf-core/src/units.rs

use uom::si::f64::{
    Angle as UomAngle, Frequency as UomFrequency, Length as UomLength, MassRate as UomMassRate,
    Power as UomPower, Pressure as UomPressure, Ratio as UomRatio,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Angle = UomAngle;
pub type Frequency = UomFrequency;
pub type Length = UomLength;
pub type MassRate = UomMassRate;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;

/// Specific energy (J/kg). Kept as a bare f64: heat drops and specific works
/// flow through the solvers as plain numbers.
pub type SpecEnergy = f64;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn kelvin(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn meter(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn watt(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn rad(v: f64) -> Angle {
    use uom::si::angle::radian;
    Angle::new::<radian>(v)
}

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

/// Shaft angular velocity (rad/s) from rotations per minute.
#[inline]
pub fn omega_from_rpm(rpm: f64) -> f64 {
    rpm * std::f64::consts::PI / 30.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressure_roundtrip() {
        let p = bar(1.0);
        assert!((p.value - 1e5).abs() < 1e-9);
    }

    #[test]
    fn omega_conversion() {
        // 60 rpm is one revolution per second
        assert!((omega_from_rpm(60.0) - 2.0 * std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn angle_degrees() {
        assert!((deg(180.0).value - std::f64::consts::PI).abs() < 1e-12);
    }
}
