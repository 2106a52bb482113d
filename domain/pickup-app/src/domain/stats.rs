#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserStats {
    pub matches_played: u32,
    pub matches_accepted: u32,
    pub avg_rating: Option<f64>,
    pub total_ratings: u32,
}
