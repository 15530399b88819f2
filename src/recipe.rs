//! Hour-indexed scene recipes
//!
//! A `SceneRecipe` is the full description of what the campus should look
//! like at a given hour: sky gradient, sun placement, light intensities and
//! colors, and the sets of animation and weather flags the subsystems apply.
//! The table is static data with no logic; `lookup` is the only entry point.

/// Linear RGB color stored as `[r, g, b]` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    /// Converts a `0xRRGGBB` color to linear components.
    pub const fn from_hex(hex: u32) -> Self {
        Rgb([
            ((hex >> 16) & 0xFF) as f32 / 255.0,
            ((hex >> 8) & 0xFF) as f32 / 255.0,
            (hex & 0xFF) as f32 / 255.0,
        ])
    }

    pub fn as_array(&self) -> [f32; 3] {
        self.0
    }
}

/// Which animated elements a recipe turns on.
///
/// Some flags drive actor pools (`bus`, `students`, ...), some drive the
/// lighting subsystem (`security_light`, `classroom_lights`), and a few are
/// narrative markers carried through from the source data (`staff`,
/// `cleaning_crew`, `playground`, `shooting_star`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationFlags {
    pub bus: bool,
    pub students: bool,
    pub teacher: bool,
    pub birds: bool,
    pub owl: bool,
    pub staff: bool,
    pub cleaning_crew: bool,
    pub security_light: bool,
    pub classroom_lights: bool,
    pub flag_raised: bool,
    pub playground: bool,
    pub fireflies: bool,
    pub shooting_star: bool,
}

impl AnimationFlags {
    pub const NONE: AnimationFlags = AnimationFlags {
        bus: false,
        students: false,
        teacher: false,
        birds: false,
        owl: false,
        staff: false,
        cleaning_crew: false,
        security_light: false,
        classroom_lights: false,
        flag_raised: false,
        playground: false,
        fireflies: false,
        shooting_star: false,
    };
}

/// Raw weather flags as stored in the table.
///
/// The sky subsystem derives *effective* flags from these: daytime hours
/// force clouds on and stars/moon off regardless of what the table says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeatherFlags {
    pub stars: bool,
    pub moon: bool,
    pub clouds: bool,
}

impl WeatherFlags {
    pub const NONE: WeatherFlags = WeatherFlags {
        stars: false,
        moon: false,
        clouds: false,
    };
}

/// One immutable per-hour scene description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneRecipe {
    pub hour: u8,
    pub title: &'static str,
    pub sky_top: Rgb,
    pub sky_bottom: Rgb,
    /// Sun placement on a large shell around the scene; normalized into a
    /// light direction by the lighting subsystem.
    pub sun_position: [f32; 3],
    pub sun_intensity: f32,
    pub ambient_intensity: f32,
    pub sun_color: Rgb,
    pub ambient_color: Rgb,
    pub animations: AnimationFlags,
    pub weather: WeatherFlags,
}

/// Looks up the recipe for an hour.
///
/// Total: any value outside `[0, 23]` falls back to the midnight entry, so
/// a bad clock reading degrades to a sensible night scene instead of a
/// panic.
pub fn lookup(hour: i32) -> &'static SceneRecipe {
    usize::try_from(hour)
        .ok()
        .and_then(|h| TABLE.get(h))
        .unwrap_or(&TABLE[0])
}

static TABLE: [SceneRecipe; 24] = [
    SceneRecipe {
        hour: 0,
        title: "Midnight Serenity",
        sky_top: Rgb::from_hex(0x0B1426),
        sky_bottom: Rgb::from_hex(0x1A1A2E),
        sun_position: [0.0, -50.0, 0.0],
        sun_intensity: 0.0,
        ambient_intensity: 0.1,
        sun_color: Rgb::from_hex(0xFFFFFF),
        ambient_color: Rgb::from_hex(0x2B2B52),
        animations: AnimationFlags {
            owl: true,
            security_light: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags {
            stars: true,
            moon: true,
            clouds: false,
        },
    },
    SceneRecipe {
        hour: 1,
        title: "Midnight Calm",
        sky_top: Rgb::from_hex(0x0F1B2E),
        sky_bottom: Rgb::from_hex(0x1E1E3E),
        sun_position: [0.0, -45.0, 0.0],
        sun_intensity: 0.0,
        ambient_intensity: 0.15,
        sun_color: Rgb::from_hex(0xFFFFFF),
        ambient_color: Rgb::from_hex(0x3B3B62),
        animations: AnimationFlags {
            security_light: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags {
            stars: true,
            moon: true,
            clouds: false,
        },
    },
    SceneRecipe {
        hour: 2,
        title: "Pre-dawn Quiet",
        sky_top: Rgb::from_hex(0x1A2332),
        sky_bottom: Rgb::from_hex(0x2A2A4A),
        sun_position: [0.0, -40.0, 0.0],
        sun_intensity: 0.0,
        ambient_intensity: 0.2,
        sun_color: Rgb::from_hex(0xFFFFFF),
        ambient_color: Rgb::from_hex(0x4B4B72),
        animations: AnimationFlags {
            cleaning_crew: true,
            security_light: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags {
            stars: true,
            moon: false,
            clouds: false,
        },
    },
    SceneRecipe {
        hour: 3,
        title: "Late Night Serenity",
        sky_top: Rgb::from_hex(0x1E2836),
        sky_bottom: Rgb::from_hex(0x2E2E5E),
        sun_position: [0.0, -35.0, 0.0],
        sun_intensity: 0.0,
        ambient_intensity: 0.2,
        sun_color: Rgb::from_hex(0xFFFFFF),
        ambient_color: Rgb::from_hex(0x5B5B82),
        animations: AnimationFlags {
            shooting_star: true,
            security_light: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags {
            stars: true,
            moon: false,
            clouds: false,
        },
    },
    SceneRecipe {
        hour: 4,
        title: "Dawn Approaching",
        sky_top: Rgb::from_hex(0x2A3442),
        sky_bottom: Rgb::from_hex(0x3A3A6A),
        sun_position: [-30.0, -20.0, 0.0],
        sun_intensity: 0.1,
        ambient_intensity: 0.3,
        sun_color: Rgb::from_hex(0xFFE4B5),
        ambient_color: Rgb::from_hex(0x6B6B92),
        animations: AnimationFlags {
            birds: true,
            security_light: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags {
            stars: true,
            moon: false,
            clouds: false,
        },
    },
    SceneRecipe {
        hour: 5,
        title: "Early Dawn",
        sky_top: Rgb::from_hex(0x4A4A72),
        sky_bottom: Rgb::from_hex(0xFF6B35),
        sun_position: [-25.0, -10.0, 0.0],
        sun_intensity: 0.3,
        ambient_intensity: 0.4,
        sun_color: Rgb::from_hex(0xFFB347),
        ambient_color: Rgb::from_hex(0x7B7BA2),
        animations: AnimationFlags {
            birds: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 6,
        title: "Sunrise",
        sky_top: Rgb::from_hex(0x87CEEB),
        sky_bottom: Rgb::from_hex(0xFF8C00),
        sun_position: [-20.0, 0.0, 0.0],
        sun_intensity: 0.6,
        ambient_intensity: 0.5,
        sun_color: Rgb::from_hex(0xFFD700),
        ambient_color: Rgb::from_hex(0xB0E0E6),
        animations: AnimationFlags {
            birds: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 7,
        title: "Morning Preparation",
        sky_top: Rgb::from_hex(0x87CEEB),
        sky_bottom: Rgb::from_hex(0xFFA500),
        sun_position: [-15.0, 10.0, 0.0],
        sun_intensity: 0.8,
        ambient_intensity: 0.6,
        sun_color: Rgb::from_hex(0xFFD700),
        ambient_color: Rgb::from_hex(0x87CEEB),
        animations: AnimationFlags {
            staff: true,
            classroom_lights: true,
            birds: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 8,
        title: "School Arrival",
        sky_top: Rgb::from_hex(0x87CEEB),
        sky_bottom: Rgb::from_hex(0x98FB98),
        sun_position: [-10.0, 20.0, 0.0],
        sun_intensity: 1.0,
        ambient_intensity: 0.7,
        sun_color: Rgb::from_hex(0xFFFF99),
        ambient_color: Rgb::from_hex(0x87CEEB),
        animations: AnimationFlags {
            bus: true,
            students: true,
            teacher: true,
            classroom_lights: true,
            birds: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 9,
        title: "Morning Classes",
        sky_top: Rgb::from_hex(0x87CEEB),
        sky_bottom: Rgb::from_hex(0x98FB98),
        sun_position: [-5.0, 30.0, 0.0],
        sun_intensity: 1.2,
        ambient_intensity: 0.8,
        sun_color: Rgb::from_hex(0xFFFF99),
        ambient_color: Rgb::from_hex(0x87CEEB),
        animations: AnimationFlags {
            classroom_lights: true,
            flag_raised: true,
            birds: true,
            teacher: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 10,
        title: "Mid-Morning",
        sky_top: Rgb::from_hex(0x87CEEB),
        sky_bottom: Rgb::from_hex(0x98FB98),
        sun_position: [0.0, 35.0, 0.0],
        sun_intensity: 1.3,
        ambient_intensity: 0.9,
        sun_color: Rgb::from_hex(0xFFFF99),
        ambient_color: Rgb::from_hex(0x87CEEB),
        animations: AnimationFlags {
            playground: true,
            teacher: true,
            classroom_lights: true,
            birds: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 11,
        title: "Late Morning",
        sky_top: Rgb::from_hex(0x87CEEB),
        sky_bottom: Rgb::from_hex(0x98FB98),
        sun_position: [5.0, 40.0, 0.0],
        sun_intensity: 1.4,
        ambient_intensity: 1.0,
        sun_color: Rgb::from_hex(0xFFFF99),
        ambient_color: Rgb::from_hex(0x87CEEB),
        animations: AnimationFlags {
            playground: true,
            students: true,
            classroom_lights: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 12,
        title: "Lunch Time",
        sky_top: Rgb::from_hex(0x87CEEB),
        sky_bottom: Rgb::from_hex(0x98FB98),
        sun_position: [10.0, 45.0, 0.0],
        sun_intensity: 1.5,
        ambient_intensity: 1.0,
        sun_color: Rgb::from_hex(0xFFFF99),
        ambient_color: Rgb::from_hex(0x87CEEB),
        animations: AnimationFlags {
            students: true,
            classroom_lights: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 13,
        title: "Afternoon Classes",
        sky_top: Rgb::from_hex(0x87CEEB),
        sky_bottom: Rgb::from_hex(0x98FB98),
        sun_position: [15.0, 40.0, 0.0],
        sun_intensity: 1.4,
        ambient_intensity: 1.0,
        sun_color: Rgb::from_hex(0xFFFF99),
        ambient_color: Rgb::from_hex(0x87CEEB),
        animations: AnimationFlags {
            teacher: true,
            classroom_lights: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 14,
        title: "Study Period",
        sky_top: Rgb::from_hex(0x87CEEB),
        sky_bottom: Rgb::from_hex(0x98FB98),
        sun_position: [20.0, 35.0, 0.0],
        sun_intensity: 1.3,
        ambient_intensity: 0.9,
        sun_color: Rgb::from_hex(0xFFFF99),
        ambient_color: Rgb::from_hex(0x87CEEB),
        animations: AnimationFlags {
            students: true,
            classroom_lights: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 15,
        title: "After School",
        sky_top: Rgb::from_hex(0x87CEEB),
        sky_bottom: Rgb::from_hex(0x98FB98),
        sun_position: [25.0, 30.0, 0.0],
        sun_intensity: 1.2,
        ambient_intensity: 0.8,
        sun_color: Rgb::from_hex(0xFFD700),
        ambient_color: Rgb::from_hex(0x87CEEB),
        animations: AnimationFlags {
            bus: true,
            students: true,
            teacher: true,
            classroom_lights: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 16,
        title: "Late Afternoon",
        sky_top: Rgb::from_hex(0x87CEEB),
        sky_bottom: Rgb::from_hex(0xFFA500),
        sun_position: [30.0, 20.0, 0.0],
        sun_intensity: 1.0,
        ambient_intensity: 0.7,
        sun_color: Rgb::from_hex(0xFFD700),
        ambient_color: Rgb::from_hex(0x87CEEB),
        animations: AnimationFlags {
            playground: true,
            students: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 17,
        title: "Evening Preparation",
        sky_top: Rgb::from_hex(0x87CEEB),
        sky_bottom: Rgb::from_hex(0xFF8C00),
        sun_position: [35.0, 10.0, 0.0],
        sun_intensity: 0.8,
        ambient_intensity: 0.6,
        sun_color: Rgb::from_hex(0xFF8C00),
        ambient_color: Rgb::from_hex(0x87CEEB),
        animations: AnimationFlags {
            cleaning_crew: true,
            classroom_lights: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 18,
        title: "Sunset",
        sky_top: Rgb::from_hex(0xFF6B35),
        sky_bottom: Rgb::from_hex(0xFF1493),
        sun_position: [40.0, 0.0, 0.0],
        sun_intensity: 0.6,
        ambient_intensity: 0.5,
        sun_color: Rgb::from_hex(0xFF6B35),
        ambient_color: Rgb::from_hex(0xFFB6C1),
        animations: AnimationFlags {
            birds: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 19,
        title: "Dusk",
        sky_top: Rgb::from_hex(0x4B0082),
        sky_bottom: Rgb::from_hex(0xFF4500),
        sun_position: [45.0, -10.0, 0.0],
        sun_intensity: 0.3,
        ambient_intensity: 0.4,
        sun_color: Rgb::from_hex(0xFF4500),
        ambient_color: Rgb::from_hex(0x8A2BE2),
        animations: AnimationFlags {
            security_light: true,
            birds: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 20,
        title: "Evening Activities",
        sky_top: Rgb::from_hex(0x2E2E5E),
        sky_bottom: Rgb::from_hex(0x8B0000),
        sun_position: [50.0, -20.0, 0.0],
        sun_intensity: 0.1,
        ambient_intensity: 0.3,
        sun_color: Rgb::from_hex(0xFF4500),
        ambient_color: Rgb::from_hex(0x6B6B92),
        animations: AnimationFlags {
            classroom_lights: true,
            students: true,
            security_light: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 21,
        title: "Night Falling",
        sky_top: Rgb::from_hex(0x1A1A2E),
        sky_bottom: Rgb::from_hex(0x4B0082),
        sun_position: [50.0, -30.0, 0.0],
        sun_intensity: 0.0,
        ambient_intensity: 0.2,
        sun_color: Rgb::from_hex(0xFFFFFF),
        ambient_color: Rgb::from_hex(0x5B5B82),
        animations: AnimationFlags {
            classroom_lights: true,
            security_light: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags::NONE,
    },
    SceneRecipe {
        hour: 22,
        title: "Late Evening",
        sky_top: Rgb::from_hex(0x0B1426),
        sky_bottom: Rgb::from_hex(0x2E2E5E),
        sun_position: [0.0, -40.0, 0.0],
        sun_intensity: 0.0,
        ambient_intensity: 0.15,
        sun_color: Rgb::from_hex(0xFFFFFF),
        ambient_color: Rgb::from_hex(0x4B4B72),
        animations: AnimationFlags {
            fireflies: true,
            security_light: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags {
            stars: true,
            moon: false,
            clouds: false,
        },
    },
    SceneRecipe {
        hour: 23,
        title: "Night Quiet",
        sky_top: Rgb::from_hex(0x0B1426),
        sky_bottom: Rgb::from_hex(0x1A1A2E),
        sun_position: [0.0, -45.0, 0.0],
        sun_intensity: 0.0,
        ambient_intensity: 0.1,
        sun_color: Rgb::from_hex(0xFFFFFF),
        ambient_color: Rgb::from_hex(0x3B3B62),
        animations: AnimationFlags {
            security_light: true,
            ..AnimationFlags::NONE
        },
        weather: WeatherFlags {
            stars: true,
            moon: true,
            clouds: false,
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_total_and_wraps_to_midnight() {
        for h in 0..24 {
            assert_eq!(lookup(h).hour, h as u8);
        }
        assert_eq!(lookup(-1).hour, 0);
        assert_eq!(lookup(24).hour, 0);
        assert_eq!(lookup(i32::MAX).hour, 0);
    }

    #[test]
    fn lookup_is_deterministic() {
        for h in 0..24 {
            assert_eq!(lookup(h), lookup(h));
        }
    }

    #[test]
    fn intensities_are_non_negative() {
        for h in 0..24 {
            let r = lookup(h);
            assert!(r.sun_intensity >= 0.0, "hour {h}");
            assert!(r.ambient_intensity >= 0.0, "hour {h}");
        }
    }

    #[test]
    fn night_hours_have_no_sun() {
        for h in [0, 1, 2, 3, 21, 22, 23] {
            assert_eq!(lookup(h).sun_intensity, 0.0, "hour {h}");
        }
    }

    #[test]
    fn rgb_from_hex_channels() {
        let c = Rgb::from_hex(0xFF8000);
        assert!((c.0[0] - 1.0).abs() < 1e-6);
        assert!((c.0[1] - 128.0 / 255.0).abs() < 1e-6);
        assert!((c.0[2] - 0.0).abs() < 1e-6);
    }

    #[test]
    fn school_morning_flags() {
        let r = lookup(8);
        assert!(r.animations.bus);
        assert!(r.animations.students);
        assert!(r.animations.teacher);
        assert!(r.animations.classroom_lights);
        assert!(!r.animations.owl);
    }
}
