//! Point-weighting schedule.

/// Maximum number of assisting professionals.
pub const MAX_ASSISTANTS: usize = 5;

/// Share of the (incremented) SP taken by the anesthesiologist.
pub const ANESTHESIOLOGIST_SHARE: f64 = 0.30;

/// Point weight of each assistant tier, relative to the surgeon's points.
///
/// Tier `k` (1-based) is unlocked when the assistant count is at least `k`.
pub const ASSISTANT_WEIGHTS: [f64; MAX_ASSISTANTS] = [0.30, 0.20, 0.20, 0.20, 0.20];

/// Weighted points of every professional for one procedure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointAllocation {
    /// Surgeon, always the full procedure points
    pub cirurgiao: f64,
    /// 1st..5th assistant; locked tiers hold 0
    pub auxiliares: [f64; MAX_ASSISTANTS],
}

impl PointAllocation {
    /// Sum of all unlocked tiers.
    pub fn total(&self) -> f64 {
        self.auxiliares
            .iter()
            .fold(self.cirurgiao, |total, points| total + points)
    }
}

/// Allocate points for `pontos` procedure points and `auxiliares` assistants.
///
/// Counts above [`MAX_ASSISTANTS`] unlock every tier; zero or negative counts
/// leave only the surgeon.
pub fn points_for_tier(pontos: i64, auxiliares: i64) -> PointAllocation {
    let pontos = pontos as f64;
    let mut allocation = PointAllocation {
        cirurgiao: pontos,
        auxiliares: [0.0; MAX_ASSISTANTS],
    };

    for (tier, weight) in (1i64..).zip(ASSISTANT_WEIGHTS) {
        if auxiliares >= tier {
            allocation.auxiliares[(tier - 1) as usize] = pontos * weight;
        }
    }
    allocation
}
