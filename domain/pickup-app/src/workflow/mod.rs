use crate::domain::{
    MatchId, RepoRetrieveError, UserId,
    r#match::{Match, MatchRepository},
};

pub mod lineup;
pub mod matches;
pub mod player;
pub mod rating;
pub mod roster;

#[derive(Debug, PartialEq, Eq)]
pub enum OrganizerCheckError {
    MatchNotFound,
    Forbidden,
    Internal,
}

/// Loads the match fresh from the repository and checks that `actor` organizes
/// it. Ownership is never cached between calls.
pub async fn authorize_organizer<M: MatchRepository + ?Sized>(
    match_repository: &M,
    match_id: MatchId,
    actor: UserId,
) -> Result<Match, OrganizerCheckError> {
    let match_entry = match match_repository.get_match(match_id).await {
        Ok(match_entry) => match_entry,
        Err(RepoRetrieveError::NotFound) => return Err(OrganizerCheckError::MatchNotFound),
        Err(RepoRetrieveError::StorageError(e)) => {
            log::error!("Failed to load match {}: {}", match_id, e);
            return Err(OrganizerCheckError::Internal);
        }
    };
    if !match_entry.is_organizer(actor) {
        log::warn!(
            "User {} tried an organizer action on match {} owned by {}",
            actor,
            match_id,
            match_entry.owner
        );
        return Err(OrganizerCheckError::Forbidden);
    }
    Ok(match_entry)
}
