use crate::helpers::{
    add_new_project, get_json_response_body, join_via_invitation,
    promote_to_admin, TestApp,
};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn new_project_should_return_201_and_make_creator_owner(
    app: &mut TestApp,
) {
    let user = app.signed_in_user().await;

    let schema = json!({
      "$schema": "http://json-schema.org/draft-04/schema#",
      "description": "",
      "type": "object",
      "properties": {
        "name": {
          "type": "string",
          "minLength": 1,
          "maxLength": 255
        },
        "id": {
          "type": "string",
          "minLength": 36,
          "maxLength": 36
        },
        "isPublic": {
          "type": "boolean"
        }
      },
      "required": [
        "name",
        "id",
        "isPublic"
      ]
    });

    let response = user
        .post_projects_new(&json!({ "name": "Craggy Island" }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body = get_json_response_body(response).await;
    assert!(
        jsonschema::is_valid(&schema, &body),
        "response does not match schema"
    );
    assert_eq!(body.get("name").unwrap(), "Craggy Island");
    assert_eq!(body.get("isPublic").unwrap(), false);

    let project_id = body.get("id").unwrap().as_str().unwrap();

    let response = user.get_members(project_id).await;
    let body = get_json_response_body(response).await;
    let members = body.get("members").unwrap().as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].get("userId").unwrap(), user.user_id.as_str());
    assert_eq!(members[0].get("role").unwrap(), "OWNER");
}

#[test_context(TestApp)]
#[tokio::test]
async fn new_project_should_return_400_for_invalid_names(app: &mut TestApp) {
    let user = app.signed_in_user().await;

    for name in ["", &"a".repeat(256)] {
        let response =
            user.post_projects_new(&json!({ "name": name })).await;
        assert_eq!(response.status().as_u16(), 400);
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn new_project_should_return_401_if_not_authenticated(
    app: &mut TestApp,
) {
    let user = app.anonymous_user();
    let response = user
        .post_projects_new(&json!({ "name": "Craggy Island" }))
        .await;
    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestApp)]
#[tokio::test]
async fn private_project_should_be_hidden_from_non_members(
    app: &mut TestApp,
) {
    let owner = app.signed_in_user().await;
    let outsider = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Private Island", false).await;

    let response = outsider.get_project(&project_id).await;
    assert_eq!(
        response.status().as_u16(),
        403,
        "Non-members must not view a private project"
    );

    // The same boundary holds for every project-scoped read.
    assert_eq!(
        outsider.get_members(&project_id).await.status().as_u16(),
        403
    );
    assert_eq!(
        outsider.get_tasks(&project_id).await.status().as_u16(),
        403
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn public_project_should_be_visible_to_non_members(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let outsider = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Public Island", true).await;

    let response = outsider.get_project(&project_id).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body.get("role").unwrap(), &serde_json::Value::Null);
    assert_eq!(body.get("isPublic").unwrap(), true);
}

#[test_context(TestApp)]
#[tokio::test]
async fn get_project_should_return_404_for_unknown_ids(app: &mut TestApp) {
    let user = app.signed_in_user().await;

    let response = user
        .get_project("be9915f0-a4c2-48fb-977b-9f4f959c5729")
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn update_project_requires_admin_role(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let member = app.signed_in_user().await;
    let admin = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    join_via_invitation(&owner, &member, &project_id).await;
    join_via_invitation(&owner, &admin, &project_id).await;
    promote_to_admin(&owner, &project_id, &admin.user_id).await;

    let update = json!({ "status": "LIVE" });

    let response = member.put_project_update(&project_id, &update).await;
    assert_eq!(
        response.status().as_u16(),
        403,
        "MEMBER must not update project details"
    );

    let response = admin.put_project_update(&project_id, &update).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("status").unwrap(), "LIVE");
}

#[test_context(TestApp)]
#[tokio::test]
async fn visibility_toggle_changes_access(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let outsider = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    assert_eq!(
        outsider.get_project(&project_id).await.status().as_u16(),
        403
    );

    let response = owner
        .put_project_update(&project_id, &json!({ "isPublic": true }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    assert_eq!(
        outsider.get_project(&project_id).await.status().as_u16(),
        200
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn delete_project_requires_owner_role(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let admin = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    join_via_invitation(&owner, &admin, &project_id).await;
    promote_to_admin(&owner, &project_id, &admin.user_id).await;

    let response = admin.delete_project(&project_id).await;
    assert_eq!(
        response.status().as_u16(),
        403,
        "ADMIN must not delete the project"
    );

    let response = owner.delete_project(&project_id).await;
    assert_eq!(response.status().as_u16(), 200);

    assert_eq!(
        owner.get_project(&project_id).await.status().as_u16(),
        404
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn leave_project_removes_membership(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let member = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    join_via_invitation(&owner, &member, &project_id).await;

    let response = member
        .post_leave(&json!({
            "projectId": project_id,
            "userId": member.user_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    assert_eq!(
        member.get_project(&project_id).await.status().as_u16(),
        403,
        "A user who left loses access to the private project"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn owner_cannot_leave_project(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let project_id = add_new_project(&owner, "Craggy Island", false).await;

    let response = owner
        .post_leave(&json!({
            "projectId": project_id,
            "userId": owner.user_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 403);
}

#[test_context(TestApp)]
#[tokio::test]
async fn leave_project_rejects_identity_mismatch(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let member = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    join_via_invitation(&owner, &member, &project_id).await;

    // The member tries to make the owner leave by tampering with userId.
    let response = member
        .post_leave(&json!({
            "projectId": project_id,
            "userId": owner.user_id
        }))
        .await;
    assert_eq!(
        response.status().as_u16(),
        401,
        "userId not matching the session must be rejected"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn leave_project_as_non_member_returns_404(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let outsider = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;

    let response = outsider
        .post_leave(&json!({
            "projectId": project_id,
            "userId": outsider.user_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn project_list_shows_only_memberships(app: &mut TestApp) {
    let alice = app.signed_in_user().await;
    let bob = app.signed_in_user().await;

    let alice_project = add_new_project(&alice, "Alice's", false).await;
    let _bob_project = add_new_project(&bob, "Bob's", false).await;

    let response = alice.get_projects_list().await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    let projects = body.get("projects").unwrap().as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].get("id").unwrap(), alice_project.as_str());

    // Joining a project makes it appear in the list.
    join_via_invitation(&bob, &alice, &_bob_project).await;
    let response = alice.get_projects_list().await;
    let body = get_json_response_body(response).await;
    assert_eq!(
        body.get("projects").unwrap().as_array().unwrap().len(),
        2
    );
}
