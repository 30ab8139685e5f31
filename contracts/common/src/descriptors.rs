//! Display buckets for raw metric values.

pub fn risk_level(risk_factor: u32) -> &'static str {
    match risk_factor {
        0..=2 => "Very Low",
        3..=4 => "Low",
        5..=6 => "Medium",
        7..=8 => "High",
        _ => "Very High",
    }
}

pub fn health_grade(health_score: u32) -> &'static str {
    match health_score {
        90.. => "Excellent",
        80..=89 => "Good",
        70..=79 => "Fair",
        60..=69 => "Poor",
        _ => "Critical",
    }
}

/// Leaderboard data-quality tier.
pub fn quality_level(quality: u32) -> &'static str {
    match quality {
        80.. => "Excellent",
        60..=79 => "Good",
        40..=59 => "Fair",
        _ => "Poor",
    }
}

/// Leaderboard upload-streak tier, `streak_days` in consecutive days.
pub fn streak_level(streak_days: u32) -> &'static str {
    match streak_days {
        7.. => "Fire",
        3..=6 => "Hot",
        1..=2 => "Warm",
        _ => "Cold",
    }
}
