//! services/api/src/adapters/in_memory.rs
//!
//! An in-memory implementation of the `DatabaseService` port.
//!
//! Exercises the web layer and the repository contract without a running
//! database: integration tests build their router on top of this adapter, and
//! it doubles as a DB-less mode for local experiments. Plans are held in a
//! `Vec` so listing preserves insertion order, matching the store-native
//! ordering the Postgres adapter produces.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use study_assistant_core::domain::{
    NewStudyPlan, StudyPlan, StudyPlanPatch, User, UserCredentials,
};
use study_assistant_core::ports::{DatabaseService, PortError, PortResult};
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryDb {
    users: RwLock<HashMap<Uuid, UserCredentials>>,
    plans: RwLock<Vec<StudyPlan>>,
}

impl InMemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DatabaseService for InMemoryDb {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        hashed_password: &str,
        user_type: Option<&str>,
    ) -> PortResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email) {
            return Err(PortError::Validation("User already exists".to_string()));
        }

        let user = UserCredentials {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            user_type: user_type.map(str::to_string),
        };
        users.insert(user.id, user.clone());

        Ok(User {
            id: user.id,
            name: user.name,
            email: user.email,
            user_type: user.user_type,
            created_at: Utc::now(),
        })
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("User with email {} not found", email)))
    }

    async fn list_study_plans_by_user(&self, user_id: Uuid) -> PortResult<Vec<StudyPlan>> {
        Ok(self
            .plans
            .read()
            .await
            .iter()
            .filter(|plan| plan.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_study_plan(&self, fields: NewStudyPlan) -> PortResult<StudyPlan> {
        let plan = StudyPlan::new(fields, Utc::now())?;
        self.plans.write().await.push(plan.clone());
        Ok(plan)
    }

    async fn update_study_plan(&self, id: Uuid, patch: StudyPlanPatch) -> PortResult<StudyPlan> {
        let mut plans = self.plans.write().await;
        let plan = plans
            .iter_mut()
            .find(|plan| plan.id == id)
            .ok_or_else(|| PortError::NotFound(format!("Study plan {} not found", id)))?;

        plan.apply_patch(patch, Utc::now());
        Ok(plan.clone())
    }

    async fn delete_study_plan(&self, id: Uuid) -> PortResult<()> {
        let mut plans = self.plans.write().await;
        let before = plans.len();
        plans.retain(|plan| plan.id != id);
        if plans.len() == before {
            return Err(PortError::NotFound(format!("Study plan {} not found", id)));
        }
        Ok(())
    }
}
