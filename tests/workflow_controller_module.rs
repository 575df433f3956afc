mod support;

use brandstory::events::{EventKind, WorkflowEvent};
use brandstory::steps::{
    BackgroundInput, CharacterInput, Lighting, Personality, ProductInput, StatusKind, StepError,
};
use brandstory::workflow::{NavItemStatus, WorkflowController, WorkflowStep, STEP_COUNT};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cell::RefCell;
use std::rc::Rc;
use support::{png_upload, story_text, RecordingApi};

fn controller() -> WorkflowController<RecordingApi> {
    WorkflowController::new(RecordingApi::new())
}

fn through_background(controller: &mut WorkflowController<RecordingApi>) {
    controller.create_project("Acme").expect("project");
    controller
        .submit_character(CharacterInput::new("friendly robot mascot", None))
        .expect("character");
    controller.approve_character().expect("approve character");
    controller
        .submit_product(ProductInput::Upload(png_upload()))
        .expect("product");
    controller.approve_product().expect("approve product");
    controller
        .submit_background(BackgroundInput::new(
            "sunlit workshop",
            Some(Lighting::GoldenHour),
        ))
        .expect("background");
    controller.approve_background().expect("approve background");
}

fn through_gallery(controller: &mut WorkflowController<RecordingApi>) {
    through_background(controller);
    controller.submit_story(&story_text(200)).expect("story");
    controller.approve_story().expect("approve story");
}

#[test]
fn creating_a_project_advances_to_character_step() {
    let mut controller = controller();
    let project = controller.create_project("Acme").expect("create");

    assert_eq!(project.name, "Acme");
    assert_eq!(controller.state().current_index(), 1);
    assert_eq!(controller.current_step(), WorkflowStep::Character);
    let status = controller.project().status().expect("status");
    assert_eq!(status.kind, StatusKind::Success);
    assert_eq!(status.text, "Project created successfully!");
    assert_eq!(project.created_at_display(), "2025-01-02 03:04:05");
}

#[test]
fn blank_project_name_is_rejected_without_calling_the_api() {
    let mut controller = controller();
    let err = controller.create_project("   ").expect_err("blank");

    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Please enter a project name");
    assert!(controller.api().calls().is_empty());
    assert_eq!(controller.state().current_index(), 0);
}

#[test]
fn approving_a_character_advances_to_product_step() {
    let mut controller = controller();
    controller.create_project("Acme").expect("create");
    let character = controller
        .submit_character(CharacterInput::new(
            "friendly robot mascot",
            Some(Personality::Approachable),
        ))
        .expect("character");
    assert_eq!(controller.state().current_index(), 1);

    controller.approve_character().expect("approve");

    assert_eq!(controller.state().current_index(), 2);
    assert_eq!(character.personality_label(), "Warm & Approachable");
    let requests = controller.api().character_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].details, "friendly robot mascot");
    assert_eq!(requests[0].personality.as_deref(), Some("approachable"));
}

#[test]
fn submitting_without_a_project_is_a_sequencing_error() {
    let mut controller = controller();
    let err = controller
        .submit_character(CharacterInput::new("robot", None))
        .expect_err("no project");

    assert!(matches!(err, StepError::Sequencing(_)));
    assert_eq!(err.to_string(), "Please create a project first");
    assert!(controller.api().calls().is_empty());
}

#[test]
fn short_story_is_rejected_and_long_enough_story_is_saved() {
    let mut controller = controller();
    controller.create_project("Acme").expect("create");

    let err = controller
        .submit_story(&story_text(30))
        .expect_err("too short");
    assert_eq!(
        err.to_string(),
        "Please write a more detailed story (at least 50 characters)"
    );
    assert_eq!(controller.api().call_count("create_story"), 0);

    let story = controller.submit_story(&story_text(200)).expect("story");
    assert_eq!(story.length, 200);
    assert_eq!(controller.api().call_count("create_story"), 1);
}

#[test]
fn story_approval_lists_missing_background() {
    let mut controller = controller();
    controller.create_project("Acme").expect("create");
    controller
        .submit_character(CharacterInput::new("robot", None))
        .expect("character");
    controller.approve_character().expect("approve character");
    controller
        .submit_product(ProductInput::Generate {
            name: "Trail Shoe".to_string(),
            description: None,
        })
        .expect("product");
    controller.approve_product().expect("approve product");
    controller.submit_story(&story_text(120)).expect("story");

    let err = controller.approve_story().expect_err("missing background");

    assert_eq!(
        err.to_string(),
        "Please complete the following first: Background"
    );
    assert_eq!(controller.state().current_index(), 3);
    assert_eq!(controller.api().call_count("generate_images"), 0);
}

#[test]
fn api_failure_keeps_state_and_allows_retry() {
    let mut controller = controller();
    controller.create_project("Acme").expect("create");
    controller
        .api()
        .fail_next("create_character", 503, "Character service down");

    let err = controller
        .submit_character(CharacterInput::new("robot", None))
        .expect_err("api failure");
    assert_eq!(err.to_string(), "Error: Character service down");
    assert!(controller.character().current().is_none());
    assert_eq!(
        controller.character().status().map(|s| s.text.as_str()),
        Some("Error: Character service down")
    );

    controller
        .submit_character(CharacterInput::new("robot", None))
        .expect("retry");
    assert!(controller.character().current().is_some());
}

#[test]
fn approving_without_a_result_is_refused() {
    let mut controller = controller();
    controller.create_project("Acme").expect("create");

    assert!(controller.approve_character().is_err());
    assert_eq!(controller.state().current_index(), 1);
}

#[test]
fn story_approval_generates_images_and_opens_gallery() {
    let mut controller = controller();
    through_gallery(&mut controller);

    assert_eq!(controller.current_step(), WorkflowStep::Gallery);
    assert_eq!(controller.gallery().images().len(), 3);
    assert_eq!(controller.api().call_count("generate_images"), 1);
    assert_eq!(controller.progress().text, "100% Complete");
    let preview = controller.preview_image(0).expect("preview");
    assert_eq!(preview.image_url, "http://assets.test/generated/1-0.png");
    assert_eq!(preview.fusion_style, "Layered");
    assert_eq!(
        controller.preview_image(1).expect("preview").fusion_style,
        "Custom"
    );
}

#[test]
fn generation_failure_sets_dismissible_global_error() {
    let mut controller = controller();
    through_background(&mut controller);
    controller.submit_story(&story_text(200)).expect("story");
    controller.api().fail_next("generate_images", 500, "GPU unavailable");

    controller.approve_story().expect("approve");

    assert_eq!(controller.current_step(), WorkflowStep::Generate);
    assert_eq!(
        controller.global_error(),
        Some("Failed to generate images: GPU unavailable")
    );
    assert!(controller.gallery().images().is_empty());

    let dismissed = controller.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    assert_eq!(dismissed, Some(true));
    assert_eq!(controller.global_error(), None);

    controller.generate_final_images();
    assert_eq!(controller.current_step(), WorkflowStep::Gallery);
}

#[test]
fn successful_retry_clears_generation_error_without_dismissing() {
    let mut controller = controller();
    through_background(&mut controller);
    controller.submit_story(&story_text(200)).expect("story");
    controller.api().fail_next("generate_images", 500, "GPU unavailable");
    controller.approve_story().expect("approve");
    assert!(controller.global_error().is_some());

    controller.generate_final_images();

    assert_eq!(controller.current_step(), WorkflowStep::Gallery);
    assert_eq!(controller.gallery().images().len(), 3);
    assert_eq!(controller.global_error(), None);
    assert_eq!(controller.view().global_error, None);
}

#[test]
fn generate_more_after_failure_clears_error() {
    let mut controller = controller();
    through_gallery(&mut controller);
    controller.api().fail_next("generate_images", 503, "queue full");

    controller.generate_more();
    assert_eq!(
        controller.global_error(),
        Some("Failed to generate images: queue full")
    );

    controller.generate_more();
    assert_eq!(controller.global_error(), None);
    assert_eq!(controller.gallery().images()[0].id.as_str(), "img-2-0");
}

#[test]
fn discarding_character_leaves_story_approval_short_of_it() {
    let mut controller = controller();
    through_background(&mut controller);
    controller.submit_story(&story_text(200)).expect("story");

    controller.discard_character();

    assert!(controller.character().current().is_none());
    let status = controller.character().status().expect("status");
    assert_eq!(status.kind, StatusKind::Info);
    assert_eq!(
        controller.approve_story().expect_err("character discarded").to_string(),
        "Please complete the following first: Character"
    );
    assert_eq!(controller.api().call_count("generate_images"), 0);
}

#[test]
fn discarding_product_and_background_lists_both() {
    let mut controller = controller();
    through_background(&mut controller);
    controller.submit_story(&story_text(200)).expect("story");

    controller.discard_product();
    controller.discard_background();

    assert!(controller.product().current().is_none());
    assert!(controller.background().current().is_none());
    assert_eq!(
        controller.product().status().map(|s| s.kind),
        Some(StatusKind::Info)
    );
    assert_eq!(
        controller.background().status().map(|s| s.kind),
        Some(StatusKind::Info)
    );
    assert_eq!(
        controller.approve_story().expect_err("discarded").to_string(),
        "Please complete the following first: Product, Background"
    );
    assert_eq!(controller.current_step(), WorkflowStep::Story);
}

#[test]
fn cleared_story_must_be_saved_again_before_approval() {
    let mut controller = controller();
    through_background(&mut controller);
    controller.submit_story(&story_text(200)).expect("story");

    controller.clear_story();

    assert!(controller.story().current().is_none());
    assert_eq!(
        controller.story().status().map(|s| s.kind),
        Some(StatusKind::Info)
    );
    assert_eq!(
        controller.approve_story().expect_err("no story").to_string(),
        "Save your story before approving"
    );
    assert_eq!(controller.api().call_count("generate_images"), 0);
}

#[test]
fn refresh_project_reloads_it_from_the_api() {
    let mut controller = controller();
    assert!(controller.refresh_project().is_err());
    assert_eq!(controller.api().call_count("get_project"), 0);

    controller.create_project("Acme").expect("create");
    let refreshed = controller.refresh_project().expect("refresh");

    assert_eq!(refreshed.id.as_str(), "proj-1");
    assert_eq!(refreshed.name, "Refreshed");
    assert_eq!(controller.api().call_count("get_project"), 1);
    assert_eq!(
        controller.project().current().map(|p| p.name.as_str()),
        Some("Refreshed")
    );
    assert_eq!(controller.current_step(), WorkflowStep::Character);
}

#[test]
fn cleared_selection_cannot_be_saved() {
    let mut controller = controller();
    through_gallery(&mut controller);
    controller.select_all_images();
    assert_eq!(controller.gallery().selection_counts(), (3, 3));

    controller.clear_image_selection();

    assert_eq!(controller.gallery().selection_counts(), (0, 3));
    assert_eq!(
        controller.save_selected_images().expect_err("empty").to_string(),
        "Please select at least one image to save."
    );
    assert!(controller.saved_images().is_empty());
}

#[test]
fn generate_more_replaces_batch_without_changing_step() {
    let mut controller = controller();
    through_gallery(&mut controller);
    controller.toggle_image(0).expect("toggle");

    controller.generate_more();

    assert_eq!(controller.current_step(), WorkflowStep::Gallery);
    assert_eq!(controller.api().call_count("generate_images"), 2);
    assert_eq!(controller.gallery().selection_counts(), (0, 3));
    assert_eq!(controller.gallery().images()[0].id.as_str(), "img-2-0");
}

#[test]
fn save_and_finish_record_selection() {
    let mut controller = controller();
    through_gallery(&mut controller);

    assert_eq!(
        controller.finish_project().expect_err("empty").to_string(),
        "Please select at least one image before finishing."
    );
    assert!(controller.completion().is_none());

    assert!(controller.toggle_image(2).expect("toggle"));
    assert!(controller.toggle_image(0).expect("toggle"));
    controller.save_selected_images().expect("save");
    let saved: Vec<&str> = controller
        .saved_images()
        .iter()
        .map(|image| image.id.as_str())
        .collect();
    assert_eq!(saved, vec!["img-1-0", "img-1-2"]);

    controller.finish_project().expect("finish");
    let summary = controller.completion().expect("completion");
    assert_eq!((summary.selected_images, summary.total_images), (2, 3));
    assert!(controller.view().completion.is_some());
}

#[test]
fn reset_clears_every_downstream_result() {
    let mut controller = controller();
    through_gallery(&mut controller);
    controller.select_all_images();

    controller.reset_project();

    assert_eq!(controller.state().current_index(), 0);
    assert!(controller.project().current().is_none());
    assert!(controller.character().current().is_none());
    assert!(controller.product().current().is_none());
    assert!(controller.background().current().is_none());
    assert!(controller.story().current().is_none());
    assert!(controller.gallery().images().is_empty());
    assert_eq!(controller.gallery().selection_counts(), (0, 0));
}

#[test]
fn new_project_while_one_is_active_resets_first() {
    let mut controller = controller();
    through_background(&mut controller);

    let project = controller.create_project("Globex").expect("second project");

    assert_eq!(project.id.as_str(), "proj-2");
    assert_eq!(controller.state().current_index(), 1);
    assert!(controller.character().current().is_none());
    assert!(controller.background().current().is_none());
}

#[test]
fn navigation_respects_availability_and_range() {
    let mut controller = controller();
    controller.create_project("Acme").expect("create");

    assert!(!controller.select_step(9));
    assert!(!controller.select_step(4));
    assert!(controller.navigate_previous());
    assert_eq!(controller.state().current_index(), 0);
    assert!(!controller.navigate_previous());
    assert!(controller.navigate_next());
    assert!(controller.navigate_next());
    assert_eq!(controller.state().current_index(), 2);
    assert!(controller.handle_key(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE))
        .expect("bound"));
    assert_eq!(controller.state().current_index(), 0);
}

#[test]
fn availability_matches_reached_step_for_every_position() {
    let mut controller = controller();
    through_gallery(&mut controller);
    for current in (0..STEP_COUNT).rev() {
        assert!(controller.select_step(current), "select {current}");
        for index in 0..STEP_COUNT {
            let available = controller.state().is_step_available(index);
            assert_eq!(available, index == 0 || current + 1 >= index);
        }
    }
}

#[test]
fn view_shows_one_section_with_nav_precedence() {
    let mut controller = controller();
    controller.create_project("Acme").expect("create");
    let view = controller.view();

    assert_eq!(view.visible_count(), 1);
    assert_eq!(view.visible_section, "character-section");
    let statuses: Vec<NavItemStatus> = view.nav.iter().map(|item| item.status).collect();
    assert_eq!(
        statuses[..4],
        [
            NavItemStatus::Completed,
            NavItemStatus::Active,
            NavItemStatus::Available,
            NavItemStatus::Locked,
        ]
    );
    assert_eq!(view.nav[1].label, "character step - available");
}

#[test]
fn alt_n_starts_a_new_project() {
    let mut controller = controller();
    through_background(&mut controller);

    let applied = controller.handle_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::ALT));

    assert_eq!(applied, Some(true));
    assert_eq!(controller.state().current_index(), 0);
    assert!(controller.project().current().is_none());
}

#[test]
fn subscribers_see_events_in_publication_order() {
    let mut controller = controller();
    let all = Rc::new(RefCell::new(Vec::new()));
    let approvals = Rc::new(RefCell::new(Vec::new()));
    {
        let all = Rc::clone(&all);
        controller.subscribe_all(move |event| all.borrow_mut().push(event.kind()));
    }
    {
        let approvals = Rc::clone(&approvals);
        controller.subscribe(EventKind::CharacterApproved, move |event| {
            if let WorkflowEvent::CharacterApproved(result) = event {
                approvals.borrow_mut().push(result.id.to_string());
            }
        });
    }

    controller.create_project("Acme").expect("create");
    controller
        .submit_character(CharacterInput::new("robot", None))
        .expect("character");
    controller.approve_character().expect("approve");
    controller.create_project("Globex").expect("second project");

    assert_eq!(
        *all.borrow(),
        vec![
            EventKind::ProjectCreated,
            EventKind::CharacterCreated,
            EventKind::CharacterApproved,
            EventKind::ProjectReset,
            EventKind::ProjectCreated,
        ]
    );
    assert_eq!(*approvals.borrow(), vec!["char-1".to_string()]);
}
