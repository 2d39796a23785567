use std::str::FromStr;

use color_eyre::eyre::eyre;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::{
    InvitationCode, InviteCode, Member, MemberId, MembershipRequest, Project,
    ProjectId, ProjectName, ProjectStatus, ProjectStore, ProjectStoreError,
    RequestId, RequestStatus, Role, Task, TaskId, TaskLabel, TaskName,
    TaskPriority, TaskStatus, UserId,
};

pub struct PostgresProjectStore {
    pool: PgPool,
}

impl PostgresProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProjectStore for PostgresProjectStore {
    #[tracing::instrument(name = "Adding project to PostgreSQL", skip_all)]
    async fn add_project(
        &mut self,
        project: &Project,
        owner: &Member,
    ) -> Result<(), ProjectStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        sqlx::query(
            r#"
            INSERT INTO projects
                (id, name, description, status, is_public, owner_id,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(project.project_id.as_ref())
        .bind(project.project_name.as_ref())
        .bind(project.description.as_deref())
        .bind(project.status.to_string())
        .bind(project.is_public)
        .bind(project.owner_id.as_ref())
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        sqlx::query(
            r#"
            INSERT INTO members (id, project_id, user_id, role)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(owner.member_id.as_ref())
        .bind(owner.project_id.as_ref())
        .bind(owner.user_id.as_ref())
        .bind(owner.role.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        tx.commit()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Getting project from PostgreSQL", skip_all)]
    async fn get_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Project, ProjectStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, status, is_public, owner_id,
                   created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(project_id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ProjectStoreError::ProjectIDNotFound,
            err => ProjectStoreError::UnexpectedError(eyre!(err)),
        })?;

        project_from_row(&row)
    }

    #[tracing::instrument(
        name = "Getting projects for user from PostgreSQL",
        skip_all
    )]
    async fn get_projects_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Project>, ProjectStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.name, p.description, p.status, p.is_public,
                   p.owner_id, p.created_at, p.updated_at
            FROM projects p
            INNER JOIN members m ON m.project_id = p.id
            WHERE m.user_id = $1
            ORDER BY p.created_at
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter().map(project_from_row).collect()
    }

    #[tracing::instrument(name = "Updating project in PostgreSQL", skip_all)]
    async fn update_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = $2, description = $3, status = $4, is_public = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(project.project_id.as_ref())
        .bind(project.project_name.as_ref())
        .bind(project.description.as_deref())
        .bind(project.status.to_string())
        .bind(project.is_public)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::ProjectIDNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Deleting project from PostgreSQL", skip_all)]
    async fn delete_project(
        &mut self,
        project_id: &ProjectId,
    ) -> Result<(), ProjectStoreError> {
        // Members, tasks, codes and requests cascade via foreign keys.
        let result = sqlx::query(
            r#"
            DELETE FROM projects WHERE id = $1
            "#,
        )
        .bind(project_id.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::ProjectIDNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Getting member from PostgreSQL", skip_all)]
    async fn get_member(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
    ) -> Result<Option<Member>, ProjectStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, project_id, user_id, role
            FROM members
            WHERE project_id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id.as_ref())
        .bind(user_id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        row.as_ref().map(member_from_row).transpose()
    }

    #[tracing::instrument(
        name = "Getting member by ID from PostgreSQL",
        skip_all
    )]
    async fn get_member_by_id(
        &self,
        project_id: &ProjectId,
        member_id: &MemberId,
    ) -> Result<Member, ProjectStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, project_id, user_id, role
            FROM members
            WHERE project_id = $1 AND id = $2
            "#,
        )
        .bind(project_id.as_ref())
        .bind(member_id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ProjectStoreError::MemberNotFound,
            err => ProjectStoreError::UnexpectedError(eyre!(err)),
        })?;

        member_from_row(&row)
    }

    #[tracing::instrument(name = "Getting members from PostgreSQL", skip_all)]
    async fn get_members(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Member>, ProjectStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, project_id, user_id, role
            FROM members
            WHERE project_id = $1
            "#,
        )
        .bind(project_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter().map(member_from_row).collect()
    }

    #[tracing::instrument(name = "Adding member to PostgreSQL", skip_all)]
    async fn add_member(
        &mut self,
        member: &Member,
    ) -> Result<(), ProjectStoreError> {
        sqlx::query(
            r#"
            INSERT INTO members (id, project_id, user_id, role)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(member.member_id.as_ref())
        .bind(member.project_id.as_ref())
        .bind(member.user_id.as_ref())
        .bind(member.role.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ProjectStoreError::MemberExists
            }
            sqlx::Error::Database(db_err)
                if db_err.is_foreign_key_violation() =>
            {
                ProjectStoreError::ProjectIDNotFound
            }
            err => ProjectStoreError::UnexpectedError(eyre!(err)),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Updating member role in PostgreSQL", skip_all)]
    async fn update_member_role(
        &mut self,
        project_id: &ProjectId,
        member_id: &MemberId,
        role: Role,
    ) -> Result<(), ProjectStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE members SET role = $3
            WHERE project_id = $1 AND id = $2
            "#,
        )
        .bind(project_id.as_ref())
        .bind(member_id.as_ref())
        .bind(role.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::MemberNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Removing member from PostgreSQL", skip_all)]
    async fn remove_member(
        &mut self,
        project_id: &ProjectId,
        member_id: &MemberId,
    ) -> Result<(), ProjectStoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM members WHERE project_id = $1 AND id = $2
            "#,
        )
        .bind(project_id.as_ref())
        .bind(member_id.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::MemberNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(
        name = "Removing member by user from PostgreSQL",
        skip_all
    )]
    async fn remove_member_by_user(
        &mut self,
        project_id: &ProjectId,
        user_id: &UserId,
    ) -> Result<(), ProjectStoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM members WHERE project_id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id.as_ref())
        .bind(user_id.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::MemberNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(
        name = "Removing all memberships for user from PostgreSQL",
        skip_all
    )]
    async fn remove_user_memberships(
        &mut self,
        user_id: &UserId,
    ) -> Result<(), ProjectStoreError> {
        sqlx::query(
            r#"
            DELETE FROM members WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;
        Ok(())
    }

    #[tracing::instrument(
        name = "Upserting invitation code in PostgreSQL",
        skip_all
    )]
    async fn upsert_invitation_code(
        &mut self,
        invitation: &InvitationCode,
    ) -> Result<(), ProjectStoreError> {
        sqlx::query(
            r#"
            INSERT INTO invitation_codes (project_id, code, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (project_id)
            DO UPDATE SET code = EXCLUDED.code,
                          expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(invitation.project_id.as_ref())
        .bind(invitation.code.as_ref())
        .bind(invitation.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err)
                if db_err.is_foreign_key_violation() =>
            {
                ProjectStoreError::ProjectIDNotFound
            }
            err => ProjectStoreError::UnexpectedError(eyre!(err)),
        })?;
        Ok(())
    }

    #[tracing::instrument(
        name = "Getting invitation code from PostgreSQL",
        skip_all
    )]
    async fn get_invitation_code(
        &self,
        project_id: &ProjectId,
    ) -> Result<InvitationCode, ProjectStoreError> {
        let row = sqlx::query(
            r#"
            SELECT project_id, code, expires_at
            FROM invitation_codes
            WHERE project_id = $1
            "#,
        )
        .bind(project_id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                ProjectStoreError::InvitationCodeNotFound
            }
            err => ProjectStoreError::UnexpectedError(eyre!(err)),
        })?;

        invitation_from_row(&row)
    }

    #[tracing::instrument(
        name = "Adding membership request to PostgreSQL",
        skip_all
    )]
    async fn add_membership_request(
        &mut self,
        request: &MembershipRequest,
    ) -> Result<(), ProjectStoreError> {
        sqlx::query(
            r#"
            INSERT INTO membership_requests
                (id, project_id, user_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(request.request_id.as_ref())
        .bind(request.project_id.as_ref())
        .bind(request.user_id.as_ref())
        .bind(request.status.to_string())
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ProjectStoreError::PendingRequestExists
            }
            sqlx::Error::Database(db_err)
                if db_err.is_foreign_key_violation() =>
            {
                ProjectStoreError::ProjectIDNotFound
            }
            err => ProjectStoreError::UnexpectedError(eyre!(err)),
        })?;
        Ok(())
    }

    #[tracing::instrument(
        name = "Getting membership request from PostgreSQL",
        skip_all
    )]
    async fn get_membership_request(
        &self,
        request_id: &RequestId,
    ) -> Result<MembershipRequest, ProjectStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, project_id, user_id, status, created_at
            FROM membership_requests
            WHERE id = $1
            "#,
        )
        .bind(request_id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ProjectStoreError::RequestIDNotFound,
            err => ProjectStoreError::UnexpectedError(eyre!(err)),
        })?;

        request_from_row(&row)
    }

    #[tracing::instrument(
        name = "Getting membership requests from PostgreSQL",
        skip_all
    )]
    async fn get_membership_requests(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<MembershipRequest>, ProjectStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, project_id, user_id, status, created_at
            FROM membership_requests
            WHERE project_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(project_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter().map(request_from_row).collect()
    }

    // Status flip and member insertion share one transaction. The
    // `status = 'PENDING'` predicate is the optimistic-concurrency guard:
    // whichever of two racing admins commits first wins, the other sees
    // zero rows affected.
    #[tracing::instrument(
        name = "Approving membership request in PostgreSQL",
        skip_all
    )]
    async fn approve_membership_request(
        &mut self,
        request_id: &RequestId,
        member: &Member,
    ) -> Result<(), ProjectStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        let result = sqlx::query(
            r#"
            UPDATE membership_requests SET status = 'APPROVED'
            WHERE id = $1 AND status = 'PENDING'
            "#,
        )
        .bind(request_id.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            let exists = sqlx::query(
                r#"
                SELECT 1 FROM membership_requests WHERE id = $1
                "#,
            )
            .bind(request_id.as_ref())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

            return Err(match exists {
                Some(_) => ProjectStoreError::RequestAlreadyProcessed,
                None => ProjectStoreError::RequestIDNotFound,
            });
        }

        sqlx::query(
            r#"
            INSERT INTO members (id, project_id, user_id, role)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(member.member_id.as_ref())
        .bind(member.project_id.as_ref())
        .bind(member.user_id.as_ref())
        .bind(member.role.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ProjectStoreError::MemberExists
            }
            err => ProjectStoreError::UnexpectedError(eyre!(err)),
        })?;

        tx.commit()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(
        name = "Rejecting membership request in PostgreSQL",
        skip_all
    )]
    async fn reject_membership_request(
        &mut self,
        request_id: &RequestId,
    ) -> Result<(), ProjectStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE membership_requests SET status = 'REJECTED'
            WHERE id = $1 AND status = 'PENDING'
            "#,
        )
        .bind(request_id.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            let exists = sqlx::query(
                r#"
                SELECT 1 FROM membership_requests WHERE id = $1
                "#,
            )
            .bind(request_id.as_ref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

            return Err(match exists {
                Some(_) => ProjectStoreError::RequestAlreadyProcessed,
                None => ProjectStoreError::RequestIDNotFound,
            });
        }
        Ok(())
    }

    #[tracing::instrument(name = "Adding task to PostgreSQL", skip_all)]
    async fn add_task(
        &mut self,
        task: &Task,
    ) -> Result<(), ProjectStoreError> {
        sqlx::query(
            r#"
            INSERT INTO tasks
                (id, project_id, name, label, status, priority, description,
                 due_date, assignee)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(task.task_id.as_ref())
        .bind(task.project_id.as_ref())
        .bind(task.task_name.as_ref())
        .bind(task.label.to_string())
        .bind(task.status.to_string())
        .bind(task.priority.to_string())
        .bind(task.description.as_deref())
        .bind(task.due_date)
        .bind(task.assignee.as_ref().map(|id| id.as_ref()))
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err)
                if db_err.is_foreign_key_violation() =>
            {
                ProjectStoreError::ProjectIDNotFound
            }
            err => ProjectStoreError::UnexpectedError(eyre!(err)),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting task from PostgreSQL", skip_all)]
    async fn get_task(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
    ) -> Result<Task, ProjectStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, project_id, name, label, status, priority,
                   description, due_date, assignee
            FROM tasks
            WHERE project_id = $1 AND id = $2
            "#,
        )
        .bind(project_id.as_ref())
        .bind(task_id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ProjectStoreError::TaskIDNotFound,
            err => ProjectStoreError::UnexpectedError(eyre!(err)),
        })?;

        task_from_row(&row)
    }

    #[tracing::instrument(name = "Getting tasks from PostgreSQL", skip_all)]
    async fn get_tasks(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Task>, ProjectStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, project_id, name, label, status, priority,
                   description, due_date, assignee
            FROM tasks
            WHERE project_id = $1
            "#,
        )
        .bind(project_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter().map(task_from_row).collect()
    }

    #[tracing::instrument(name = "Updating task in PostgreSQL", skip_all)]
    async fn update_task(
        &mut self,
        task: &Task,
    ) -> Result<(), ProjectStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET name = $3, label = $4, status = $5, priority = $6,
                description = $7, due_date = $8, assignee = $9
            WHERE project_id = $1 AND id = $2
            "#,
        )
        .bind(task.project_id.as_ref())
        .bind(task.task_id.as_ref())
        .bind(task.task_name.as_ref())
        .bind(task.label.to_string())
        .bind(task.status.to_string())
        .bind(task.priority.to_string())
        .bind(task.description.as_deref())
        .bind(task.due_date)
        .bind(task.assignee.as_ref().map(|id| id.as_ref()))
        .execute(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::TaskIDNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Deleting task from PostgreSQL", skip_all)]
    async fn delete_task(
        &mut self,
        project_id: &ProjectId,
        task_id: &TaskId,
    ) -> Result<(), ProjectStoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks WHERE project_id = $1 AND id = $2
            "#,
        )
        .bind(project_id.as_ref())
        .bind(task_id.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::TaskIDNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(
        name = "Deleting projects owned by user from PostgreSQL",
        skip_all
    )]
    async fn delete_projects_owned_by(
        &mut self,
        user_id: &UserId,
    ) -> Result<(), ProjectStoreError> {
        sqlx::query(
            r#"
            DELETE FROM projects WHERE owner_id = $1
            "#,
        )
        .bind(user_id.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;
        Ok(())
    }
}

fn project_from_row(row: &PgRow) -> Result<Project, ProjectStoreError> {
    let status: String = try_get(row, "status")?;
    Ok(Project {
        project_id: ProjectId::new(try_get(row, "id")?),
        project_name: ProjectName::parse(&try_get::<String>(row, "name")?)
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?,
        description: try_get(row, "description")?,
        status: ProjectStatus::from_str(&status)
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?,
        is_public: try_get(row, "is_public")?,
        owner_id: UserId::new(try_get(row, "owner_id")?),
        created_at: try_get(row, "created_at")?,
        updated_at: try_get(row, "updated_at")?,
    })
}

fn member_from_row(row: &PgRow) -> Result<Member, ProjectStoreError> {
    let role: String = try_get(row, "role")?;
    Ok(Member {
        member_id: MemberId::new(try_get(row, "id")?),
        project_id: ProjectId::new(try_get(row, "project_id")?),
        user_id: UserId::new(try_get(row, "user_id")?),
        role: Role::from_str(&role)
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?,
    })
}

fn invitation_from_row(
    row: &PgRow,
) -> Result<InvitationCode, ProjectStoreError> {
    let code: String = try_get(row, "code")?;
    Ok(InvitationCode {
        project_id: ProjectId::new(try_get(row, "project_id")?),
        code: InviteCode::parse(&code)
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?,
        expires_at: try_get(row, "expires_at")?,
    })
}

fn request_from_row(
    row: &PgRow,
) -> Result<MembershipRequest, ProjectStoreError> {
    let status: String = try_get(row, "status")?;
    Ok(MembershipRequest {
        request_id: RequestId::new(try_get(row, "id")?),
        project_id: ProjectId::new(try_get(row, "project_id")?),
        user_id: UserId::new(try_get(row, "user_id")?),
        status: RequestStatus::from_str(&status)
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?,
        created_at: try_get(row, "created_at")?,
    })
}

fn task_from_row(row: &PgRow) -> Result<Task, ProjectStoreError> {
    let label: String = try_get(row, "label")?;
    let status: String = try_get(row, "status")?;
    let priority: String = try_get(row, "priority")?;
    Ok(Task {
        task_id: TaskId::new(try_get(row, "id")?),
        project_id: ProjectId::new(try_get(row, "project_id")?),
        task_name: TaskName::parse(try_get(row, "name")?)
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?,
        label: TaskLabel::from_str(&label)
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?,
        status: TaskStatus::from_str(&status)
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?,
        priority: TaskPriority::from_str(&priority)
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?,
        description: try_get(row, "description")?,
        due_date: try_get(row, "due_date")?,
        assignee: try_get::<Option<uuid::Uuid>>(row, "assignee")?
            .map(MemberId::new),
    })
}

fn try_get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, ProjectStoreError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))
}
