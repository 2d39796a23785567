use crate::helpers::{
    add_new_project, get_json_response_body, join_via_invitation,
    member_id_of, promote_to_admin, TestApp, TestUser,
};
use serde_json::json;
use test_context::test_context;

async fn create_task(
    user: &TestUser,
    project_id: &str,
    name: &str,
) -> String {
    let response = user
        .post_new_task(&json!({
            "projectId": project_id,
            "name": name,
            "label": "BUG",
            "priority": "HIGH"
        }))
        .await;
    assert_eq!(
        response.status().as_u16(),
        201,
        "Failed to create task: {name}"
    );
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("status").unwrap(), "TODO");
    body.get("taskId")
        .expect("No taskId in response")
        .as_str()
        .expect("taskId should be a string")
        .to_owned()
}

#[test_context(TestApp)]
#[tokio::test]
async fn task_creation_requires_admin_role(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let member = app.signed_in_user().await;
    let outsider = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    join_via_invitation(&owner, &member, &project_id).await;

    let request = json!({
        "projectId": project_id,
        "name": "Fix the door",
        "label": "BUG",
        "priority": "HIGH"
    });

    assert_eq!(
        member.post_new_task(&request).await.status().as_u16(),
        403,
        "MEMBER must not create tasks"
    );
    assert_eq!(
        outsider.post_new_task(&request).await.status().as_u16(),
        403
    );

    create_task(&owner, &project_id, "Fix the door").await;
}

#[test_context(TestApp)]
#[tokio::test]
async fn task_creation_rejects_invalid_enums(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let project_id = add_new_project(&owner, "Craggy Island", false).await;

    let test_cases = [
        json!({
            "projectId": project_id,
            "name": "Fix the door",
            "label": "CHORE",
            "priority": "HIGH"
        }),
        json!({
            "projectId": project_id,
            "name": "Fix the door",
            "label": "BUG",
            "priority": "URGENT"
        }),
        json!({
            "projectId": project_id,
            "name": "",
            "label": "BUG",
            "priority": "HIGH"
        }),
    ];

    for test_case in test_cases.iter() {
        let response = owner.post_new_task(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should fail with HTTP400 for input: {test_case}"
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn members_can_list_tasks(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let member = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    join_via_invitation(&owner, &member, &project_id).await;
    create_task(&owner, &project_id, "Fix the door").await;
    create_task(&owner, &project_id, "Paint the fence").await;

    let response = member.get_tasks(&project_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("tasks").unwrap().as_array().unwrap().len(), 2);
}

#[test_context(TestApp)]
#[tokio::test]
async fn anyone_signed_in_can_list_tasks_of_public_projects(
    app: &mut TestApp,
) {
    let owner = app.signed_in_user().await;
    let outsider = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Public Island", true).await;
    create_task(&owner, &project_id, "Fix the door").await;

    let response = outsider.get_tasks(&project_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("tasks").unwrap().as_array().unwrap().len(), 1);

    // Reading is open; writing is not.
    let response = outsider
        .post_new_task(&json!({
            "projectId": project_id,
            "name": "Sneaky task",
            "label": "BUG",
            "priority": "LOW"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 403);
}

#[test_context(TestApp)]
#[tokio::test]
async fn task_updates_require_admin_role(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let member = app.signed_in_user().await;
    let admin = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    join_via_invitation(&owner, &member, &project_id).await;
    join_via_invitation(&owner, &admin, &project_id).await;
    promote_to_admin(&owner, &project_id, &admin.user_id).await;

    let task_id = create_task(&owner, &project_id, "Fix the door").await;

    let update = json!({
        "projectId": project_id,
        "taskId": task_id,
        "status": "IN_PROGRESS"
    });

    assert_eq!(
        member.put_update_task(&update).await.status().as_u16(),
        403
    );

    let response = admin.put_update_task(&update).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("status").unwrap(), "IN_PROGRESS");
}

#[test_context(TestApp)]
#[tokio::test]
async fn tasks_can_be_assigned_to_project_members_only(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let member = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    let other_project_id =
        add_new_project(&owner, "Rugged Island", false).await;
    join_via_invitation(&owner, &member, &project_id).await;

    let member_id = member_id_of(&owner, &project_id, &member.user_id).await;

    let response = owner
        .post_new_task(&json!({
            "projectId": project_id,
            "name": "Fix the door",
            "label": "BUG",
            "priority": "HIGH",
            "assigneeId": member_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("assigneeId").unwrap(), member_id.as_str());

    // A member of a different project is not a valid assignee.
    let response = owner
        .post_new_task(&json!({
            "projectId": other_project_id,
            "name": "Fix the door",
            "label": "BUG",
            "priority": "HIGH",
            "assigneeId": member_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn task_deletion_requires_admin_role(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let member = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    join_via_invitation(&owner, &member, &project_id).await;

    let task_id = create_task(&owner, &project_id, "Fix the door").await;

    assert_eq!(
        member
            .delete_task(&project_id, &task_id)
            .await
            .status()
            .as_u16(),
        403
    );

    assert_eq!(
        owner
            .delete_task(&project_id, &task_id)
            .await
            .status()
            .as_u16(),
        200
    );

    // Deleting again is a 404; the task is gone.
    assert_eq!(
        owner
            .delete_task(&project_id, &task_id)
            .await
            .status()
            .as_u16(),
        404
    );
}
