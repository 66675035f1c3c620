use crate::domain::{generate_unique_id, Role, User, UserProfile};
use crate::storage::{Collection, StoreError};

use super::{MediaRepository, RepositoryError, RepositoryResult};

/// Which accounts an update may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateScope {
    AnyUser,
    AdminOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserListing {
    ByEmail(Option<User>),
    Clients(Vec<User>),
}

pub struct UserRepository {
    collection: Collection<User>,
}

fn user_not_found(id: &str) -> RepositoryError {
    RepositoryError::NotFound(format!("User {} not found", id))
}

fn client_or_movie_not_found() -> RepositoryError {
    RepositoryError::NotFound("Client or movie were not found".to_string())
}

fn email_taken() -> RepositoryError {
    RepositoryError::Conflict("Email already used".to_string())
}

impl UserRepository {
    pub fn new(collection: Collection<User>) -> Self {
        Self { collection }
    }

    pub async fn ensure(&self) -> Result<(), StoreError> {
        self.collection.ensure().await
    }

    /// With an email, the single account using it; otherwise every client.
    pub async fn list(&self, email: Option<&str>) -> RepositoryResult<UserListing> {
        let users = self.collection.load().await?;
        Ok(match email {
            Some(email) => UserListing::ByEmail(users.into_iter().find(|user| user.email == email)),
            None => UserListing::Clients(
                users
                    .into_iter()
                    .filter(|user| user.role == Role::Client)
                    .collect(),
            ),
        })
    }

    pub async fn list_admins(&self) -> RepositoryResult<Vec<User>> {
        let mut users = self.collection.load().await?;
        users.retain(|user| user.role == Role::Admin);
        Ok(users)
    }

    pub async fn get_by_id(&self, id: &str) -> RepositoryResult<Option<User>> {
        Ok(self
            .collection
            .load()
            .await?
            .into_iter()
            .find(|user| user.id == id))
    }

    pub async fn register(&self, profile: UserProfile, role: Role) -> RepositoryResult<User> {
        self.collection
            .update(|users| -> RepositoryResult<User> {
                if users.iter().any(|user| user.email == profile.email) {
                    return Err(email_taken());
                }
                let id = generate_unique_id(|candidate| users.iter().any(|u| u.id == candidate));
                let user = profile.into_user(id, role);
                users.push(user.clone());
                Ok(user)
            })
            .await
    }

    pub async fn update(
        &self,
        id: &str,
        profile: UserProfile,
        scope: UpdateScope,
    ) -> RepositoryResult<User> {
        self.collection
            .update(|users| -> RepositoryResult<User> {
                if users
                    .iter()
                    .any(|user| user.email == profile.email && user.id != id)
                {
                    return Err(email_taken());
                }
                let user = users
                    .iter_mut()
                    .find(|user| user.id == id)
                    .filter(|user| scope == UpdateScope::AnyUser || user.role == Role::Admin)
                    .ok_or_else(|| user_not_found(id))?;
                profile.apply(user);
                Ok(user.clone())
            })
            .await
    }

    pub async fn delete(&self, id: &str) -> RepositoryResult<()> {
        self.collection
            .update(|users| -> RepositoryResult<()> {
                let before = users.len();
                users.retain(|user| user.id != id);
                if users.len() == before {
                    return Err(user_not_found(id));
                }
                Ok(())
            })
            .await
    }

    pub async fn get_watchlist(&self, id: &str) -> RepositoryResult<Vec<String>> {
        self.collection
            .load()
            .await?
            .into_iter()
            .find(|user| user.id == id && user.role == Role::Client)
            .map(|user| user.my_list)
            .ok_or_else(|| user_not_found(id))
    }

    /// Adds a movie to a client's watchlist. Adding a movie twice keeps a
    /// single entry. The catalogue stays locked until the watchlist is saved,
    /// so a movie deleted concurrently is never added.
    pub async fn add_to_watchlist(
        &self,
        user_id: &str,
        movie_id: &str,
        media: &MediaRepository,
    ) -> RepositoryResult<Vec<String>> {
        let catalogue = media.lock().await;
        if !catalogue.exists(movie_id).await? {
            return Err(client_or_movie_not_found());
        }
        self.collection
            .update(|users| -> RepositoryResult<Vec<String>> {
                let user = users
                    .iter_mut()
                    .find(|user| user.id == user_id && user.role == Role::Client)
                    .ok_or_else(client_or_movie_not_found)?;
                if !user.my_list.iter().any(|entry| entry == movie_id) {
                    user.my_list.push(movie_id.to_string());
                }
                Ok(user.my_list.clone())
            })
            .await
    }

    /// Removes a movie from a watchlist. The movie itself is not looked up,
    /// so ids of deleted movies can still be removed.
    pub async fn remove_from_watchlist(
        &self,
        user_id: &str,
        movie_id: &str,
    ) -> RepositoryResult<Vec<String>> {
        self.collection
            .update(|users| -> RepositoryResult<Vec<String>> {
                let user = users
                    .iter_mut()
                    .find(|user| user.id == user_id)
                    .ok_or_else(|| user_not_found(user_id))?;
                user.my_list.retain(|entry| entry != movie_id);
                Ok(user.my_list.clone())
            })
            .await
    }

    /// Drops a deleted movie from every watchlist. Returns how many lists
    /// changed; nothing is written when none did.
    pub async fn forget_movie(&self, movie_id: &str) -> RepositoryResult<usize> {
        let guard = self.collection.lock().await;
        let mut users = guard.load().await?;
        let mut changed = 0;
        for user in users.iter_mut() {
            let before = user.my_list.len();
            user.my_list.retain(|entry| entry != movie_id);
            if user.my_list.len() != before {
                changed += 1;
            }
        }
        if changed > 0 {
            guard.save(&users).await?;
        }
        Ok(changed)
    }

    /// Deletes a movie from the catalogue and from every watchlist. The
    /// catalogue lock is taken before the users lock, as in
    /// [`UserRepository::add_to_watchlist`]. Once the movie is gone a failed
    /// watchlist cleanup is only logged.
    pub async fn delete_movie(
        &self,
        movie_id: &str,
        media: &MediaRepository,
    ) -> RepositoryResult<()> {
        let catalogue = media.lock().await;
        catalogue.delete(movie_id).await?;
        match self.forget_movie(movie_id).await {
            Ok(changed) => {
                tracing::info!("Movie {} removed from {} watchlists", movie_id, changed)
            }
            Err(err) => {
                tracing::error!("Failed to remove movie {} from watchlists {:?}", movie_id, err)
            }
        }
        Ok(())
    }

    pub async fn set_image(&self, id: &str, image: String) -> RepositoryResult<User> {
        self.collection
            .update(|users| -> RepositoryResult<User> {
                let user = users
                    .iter_mut()
                    .find(|user| user.id == id)
                    .ok_or_else(|| user_not_found(id))?;
                user.image = Some(image);
                Ok(user.clone())
            })
            .await
    }
}
