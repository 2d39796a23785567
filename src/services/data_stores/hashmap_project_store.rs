use color_eyre::eyre::eyre;
use std::collections::HashMap;

use crate::domain::{
    InvitationCode, Member, MemberId, MembershipRequest, Project, ProjectId,
    ProjectStore, ProjectStoreError, RequestId, RequestStatus, Role, Task,
    TaskId, UserId,
};

#[derive(Default)]
pub struct HashmapProjectStore {
    projects: HashMap<ProjectId, Project>,
    members: HashMap<ProjectId, Vec<Member>>,
    invitation_codes: HashMap<ProjectId, InvitationCode>,
    membership_requests: HashMap<RequestId, MembershipRequest>,
    tasks: HashMap<TaskId, Task>,
}

impl HashmapProjectStore {
    fn project_members(
        &self,
        project_id: &ProjectId,
    ) -> Result<&Vec<Member>, ProjectStoreError> {
        if !self.projects.contains_key(project_id) {
            return Err(ProjectStoreError::ProjectIDNotFound);
        }
        self.members
            .get(project_id)
            .ok_or(ProjectStoreError::ProjectIDNotFound)
    }
}

#[async_trait::async_trait]
impl ProjectStore for HashmapProjectStore {
    async fn add_project(
        &mut self,
        project: &Project,
        owner: &Member,
    ) -> Result<(), ProjectStoreError> {
        if owner.project_id != project.project_id
            || owner.user_id != project.owner_id
            || owner.role != Role::Owner
        {
            return Err(ProjectStoreError::UnexpectedError(eyre!(
                "Owner member does not match project"
            )));
        }

        self.projects
            .insert(project.project_id.clone(), project.clone());
        self.members
            .insert(project.project_id.clone(), vec![owner.clone()]);
        Ok(())
    }

    async fn get_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Project, ProjectStoreError> {
        self.projects
            .get(project_id)
            .cloned()
            .ok_or(ProjectStoreError::ProjectIDNotFound)
    }

    async fn get_projects_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Project>, ProjectStoreError> {
        let mut projects: Vec<Project> = self
            .members
            .iter()
            .filter(|(_, members)| {
                members.iter().any(|m| &m.user_id == user_id)
            })
            .filter_map(|(project_id, _)| self.projects.get(project_id))
            .cloned()
            .collect();
        projects.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(projects)
    }

    async fn update_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError> {
        match self.projects.get_mut(&project.project_id) {
            Some(existing) => {
                *existing = project.clone();
                Ok(())
            }
            None => Err(ProjectStoreError::ProjectIDNotFound),
        }
    }

    async fn delete_project(
        &mut self,
        project_id: &ProjectId,
    ) -> Result<(), ProjectStoreError> {
        self.projects
            .remove(project_id)
            .ok_or(ProjectStoreError::ProjectIDNotFound)?;

        self.members.remove(project_id);
        self.invitation_codes.remove(project_id);
        self.membership_requests
            .retain(|_, request| &request.project_id != project_id);
        self.tasks.retain(|_, task| &task.project_id != project_id);
        Ok(())
    }

    async fn get_member(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
    ) -> Result<Option<Member>, ProjectStoreError> {
        let members = self.project_members(project_id)?;
        Ok(members.iter().find(|m| &m.user_id == user_id).cloned())
    }

    async fn get_member_by_id(
        &self,
        project_id: &ProjectId,
        member_id: &MemberId,
    ) -> Result<Member, ProjectStoreError> {
        let members = self.project_members(project_id)?;
        members
            .iter()
            .find(|m| &m.member_id == member_id)
            .cloned()
            .ok_or(ProjectStoreError::MemberNotFound)
    }

    async fn get_members(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Member>, ProjectStoreError> {
        Ok(self.project_members(project_id)?.clone())
    }

    async fn add_member(
        &mut self,
        member: &Member,
    ) -> Result<(), ProjectStoreError> {
        if !self.projects.contains_key(&member.project_id) {
            return Err(ProjectStoreError::ProjectIDNotFound);
        }

        let members = self.members.entry(member.project_id.clone()).or_default();
        if members.iter().any(|m| m.user_id == member.user_id) {
            return Err(ProjectStoreError::MemberExists);
        }

        members.push(member.clone());
        Ok(())
    }

    async fn update_member_role(
        &mut self,
        project_id: &ProjectId,
        member_id: &MemberId,
        role: Role,
    ) -> Result<(), ProjectStoreError> {
        if !self.projects.contains_key(project_id) {
            return Err(ProjectStoreError::ProjectIDNotFound);
        }

        let members = self
            .members
            .get_mut(project_id)
            .ok_or(ProjectStoreError::ProjectIDNotFound)?;
        let member = members
            .iter_mut()
            .find(|m| &m.member_id == member_id)
            .ok_or(ProjectStoreError::MemberNotFound)?;

        member.role = role;
        Ok(())
    }

    async fn remove_member(
        &mut self,
        project_id: &ProjectId,
        member_id: &MemberId,
    ) -> Result<(), ProjectStoreError> {
        if !self.projects.contains_key(project_id) {
            return Err(ProjectStoreError::ProjectIDNotFound);
        }

        let members = self
            .members
            .get_mut(project_id)
            .ok_or(ProjectStoreError::ProjectIDNotFound)?;
        let before = members.len();
        members.retain(|m| &m.member_id != member_id);

        if members.len() == before {
            return Err(ProjectStoreError::MemberNotFound);
        }
        Ok(())
    }

    async fn remove_member_by_user(
        &mut self,
        project_id: &ProjectId,
        user_id: &UserId,
    ) -> Result<(), ProjectStoreError> {
        if !self.projects.contains_key(project_id) {
            return Err(ProjectStoreError::ProjectIDNotFound);
        }

        let members = self
            .members
            .get_mut(project_id)
            .ok_or(ProjectStoreError::ProjectIDNotFound)?;
        let before = members.len();
        members.retain(|m| &m.user_id != user_id);

        if members.len() == before {
            return Err(ProjectStoreError::MemberNotFound);
        }
        Ok(())
    }

    async fn remove_user_memberships(
        &mut self,
        user_id: &UserId,
    ) -> Result<(), ProjectStoreError> {
        for members in self.members.values_mut() {
            members.retain(|m| &m.user_id != user_id);
        }
        Ok(())
    }

    async fn upsert_invitation_code(
        &mut self,
        invitation: &InvitationCode,
    ) -> Result<(), ProjectStoreError> {
        if !self.projects.contains_key(&invitation.project_id) {
            return Err(ProjectStoreError::ProjectIDNotFound);
        }

        self.invitation_codes
            .insert(invitation.project_id.clone(), invitation.clone());
        Ok(())
    }

    async fn get_invitation_code(
        &self,
        project_id: &ProjectId,
    ) -> Result<InvitationCode, ProjectStoreError> {
        self.invitation_codes
            .get(project_id)
            .cloned()
            .ok_or(ProjectStoreError::InvitationCodeNotFound)
    }

    async fn add_membership_request(
        &mut self,
        request: &MembershipRequest,
    ) -> Result<(), ProjectStoreError> {
        if !self.projects.contains_key(&request.project_id) {
            return Err(ProjectStoreError::ProjectIDNotFound);
        }

        let has_pending = self.membership_requests.values().any(|r| {
            r.project_id == request.project_id
                && r.user_id == request.user_id
                && r.status == RequestStatus::Pending
        });
        if has_pending {
            return Err(ProjectStoreError::PendingRequestExists);
        }

        self.membership_requests
            .insert(request.request_id.clone(), request.clone());
        Ok(())
    }

    async fn get_membership_request(
        &self,
        request_id: &RequestId,
    ) -> Result<MembershipRequest, ProjectStoreError> {
        self.membership_requests
            .get(request_id)
            .cloned()
            .ok_or(ProjectStoreError::RequestIDNotFound)
    }

    async fn get_membership_requests(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<MembershipRequest>, ProjectStoreError> {
        if !self.projects.contains_key(project_id) {
            return Err(ProjectStoreError::ProjectIDNotFound);
        }

        let mut requests: Vec<MembershipRequest> = self
            .membership_requests
            .values()
            .filter(|r| &r.project_id == project_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(requests)
    }

    // The status flip and the member insertion must land together.
    // Every precondition is verified before the first mutation, so a
    // failure leaves both the request and the member list untouched.
    async fn approve_membership_request(
        &mut self,
        request_id: &RequestId,
        member: &Member,
    ) -> Result<(), ProjectStoreError> {
        let request = self
            .membership_requests
            .get(request_id)
            .ok_or(ProjectStoreError::RequestIDNotFound)?;
        if request.status != RequestStatus::Pending {
            return Err(ProjectStoreError::RequestAlreadyProcessed);
        }

        let members = self
            .members
            .get(&request.project_id)
            .ok_or(ProjectStoreError::ProjectIDNotFound)?;
        if members.iter().any(|m| m.user_id == member.user_id) {
            return Err(ProjectStoreError::MemberExists);
        }

        let project_id = request.project_id.clone();
        self.membership_requests
            .get_mut(request_id)
            .ok_or(ProjectStoreError::RequestIDNotFound)?
            .status = RequestStatus::Approved;
        self.members
            .get_mut(&project_id)
            .ok_or(ProjectStoreError::ProjectIDNotFound)?
            .push(member.clone());
        Ok(())
    }

    async fn reject_membership_request(
        &mut self,
        request_id: &RequestId,
    ) -> Result<(), ProjectStoreError> {
        let request = self
            .membership_requests
            .get_mut(request_id)
            .ok_or(ProjectStoreError::RequestIDNotFound)?;
        if request.status != RequestStatus::Pending {
            return Err(ProjectStoreError::RequestAlreadyProcessed);
        }

        request.status = RequestStatus::Rejected;
        Ok(())
    }

    async fn add_task(
        &mut self,
        task: &Task,
    ) -> Result<(), ProjectStoreError> {
        if !self.projects.contains_key(&task.project_id) {
            return Err(ProjectStoreError::ProjectIDNotFound);
        }

        self.tasks.insert(task.task_id.clone(), task.clone());
        Ok(())
    }

    async fn get_task(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
    ) -> Result<Task, ProjectStoreError> {
        self.tasks
            .get(task_id)
            .filter(|task| &task.project_id == project_id)
            .cloned()
            .ok_or(ProjectStoreError::TaskIDNotFound)
    }

    async fn get_tasks(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Task>, ProjectStoreError> {
        if !self.projects.contains_key(project_id) {
            return Err(ProjectStoreError::ProjectIDNotFound);
        }

        Ok(self
            .tasks
            .values()
            .filter(|task| &task.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn update_task(
        &mut self,
        task: &Task,
    ) -> Result<(), ProjectStoreError> {
        match self.tasks.get_mut(&task.task_id) {
            Some(existing) if existing.project_id == task.project_id => {
                *existing = task.clone();
                Ok(())
            }
            _ => Err(ProjectStoreError::TaskIDNotFound),
        }
    }

    async fn delete_task(
        &mut self,
        project_id: &ProjectId,
        task_id: &TaskId,
    ) -> Result<(), ProjectStoreError> {
        match self.tasks.get(task_id) {
            Some(task) if &task.project_id == project_id => {
                self.tasks.remove(task_id);
                Ok(())
            }
            _ => Err(ProjectStoreError::TaskIDNotFound),
        }
    }

    async fn delete_projects_owned_by(
        &mut self,
        user_id: &UserId,
    ) -> Result<(), ProjectStoreError> {
        let owned: Vec<ProjectId> = self
            .projects
            .values()
            .filter(|p| &p.owner_id == user_id)
            .map(|p| p.project_id.clone())
            .collect();

        for project_id in owned {
            self.delete_project(&project_id).await?;
        }
        Ok(())
    }
}
