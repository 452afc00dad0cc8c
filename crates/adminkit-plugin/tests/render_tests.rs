// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for page composition through the `Composer`.

use adminkit_config::AdminConfig;
use adminkit_core::{AdminError, Button, Buttons, Menu, MenuItem, Panel, Permission, User};
use adminkit_plugin::RenderOptions;
use adminkit_test_utils::{MockConnection, TestHarness};

fn sidebar() -> Menu {
    Menu::new(vec![
        MenuItem::new(1, "Dashboard", "/"),
        MenuItem::new(2, "Users", "").with_children(vec![
            MenuItem::new(3, "List", "/info/users"),
            MenuItem::new(4, "Roles", "/info/roles"),
        ]),
    ])
}

fn editor() -> User {
    User {
        id: 7,
        name: "editor".to_string(),
        permissions: vec![Permission {
            slug: "users".to_string(),
            http_method: vec!["GET".to_string()],
            http_path: vec!["/info/users*".to_string()],
        }],
        ..User::default()
    }
}

// ---- Test 1: global menu ----

#[tokio::test]
async fn test_execute_uses_global_menu_with_active_entry() {
    let harness = TestHarness::builder().with_menu(sidebar()).build();
    let ctx = harness.request("/admin/info/users?page=3");
    let user = harness.composer.auth(&ctx).unwrap();

    let body = harness
        .composer
        .execute(
            &ctx,
            &MockConnection,
            &Buttons::default(),
            &user,
            Panel::from_content("<table></table>"),
            RenderOptions::default(),
        )
        .await
        .unwrap();

    let body = String::from_utf8(body).unwrap();
    assert!(body.starts_with("template=layout pjax=false update_menu=false animation=true"));
    assert!(body.ends_with("\n<table></table>"));
    assert_eq!(harness.menus.scopes(), vec![None]);

    let param = harness.last_param();
    assert_eq!(param.menu.active_titles(), vec!["Users", "List"]);
    assert_eq!(param.template_name, "layout");
    assert_eq!(param.user.name, "admin");
    assert_eq!(param.config.prefix(), "/admin");
}

#[tokio::test]
async fn test_execute_update_menu_follows_options() {
    let harness = TestHarness::new();
    let ctx = harness.request("/admin/");
    let user = harness.composer.auth(&ctx).unwrap();

    harness
        .composer
        .execute(
            &ctx,
            &MockConnection,
            &Buttons::default(),
            &user,
            Panel::default(),
            RenderOptions::from_flags(&[false, true, true]),
        )
        .await
        .unwrap();

    let param = harness.last_param();
    assert!(!param.animation);
    assert!(param.no_compress);
    assert!(param.update_menu);
}

// ---- Test 2: plugin-scoped menu ----

#[tokio::test]
async fn test_execute_with_menu_scopes_and_forces_update() {
    let harness = TestHarness::builder().with_menu(sidebar()).build();
    let ctx = harness.request("/admin/info/roles");
    let user = harness.composer.auth(&ctx).unwrap();

    harness
        .composer
        .execute_with_menu(
            &ctx,
            &MockConnection,
            &Buttons::default(),
            &user,
            Panel::default(),
            "shop",
            RenderOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(harness.menus.scopes(), vec![Some("shop".to_string())]);
    let param = harness.last_param();
    assert!(param.update_menu);
    assert_eq!(param.menu.plugin_name, "shop");
    assert_eq!(param.menu.active_titles(), vec!["Users", "Roles"]);
}

// ---- Test 3: custom menu ----

#[tokio::test]
async fn test_custom_menu_is_used_as_given() {
    let harness = TestHarness::new();
    let ctx = harness.request("/admin/info/users");
    let user = harness.composer.auth(&ctx).unwrap();

    harness
        .composer
        .execute_with_custom_menu(
            &ctx,
            &Buttons::default(),
            &user,
            Panel::default(),
            sidebar(),
            RenderOptions::default(),
        )
        .unwrap();

    assert!(harness.menus.scopes().is_empty());
    let param = harness.last_param();
    assert!(param.update_menu);
    assert_eq!(param.menu, sidebar());
    assert!(param.menu.active_titles().is_empty());
}

// ---- Test 4: pjax ----

#[tokio::test]
async fn test_pjax_request_selects_content_template() {
    let harness = TestHarness::new();
    let ctx = harness.pjax_request("/admin/");
    let user = harness.composer.auth(&ctx).unwrap();

    let body = harness
        .composer
        .execute_with_custom_menu(
            &ctx,
            &Buttons::default(),
            &user,
            Panel::default(),
            Menu::default(),
            RenderOptions::default(),
        )
        .unwrap();

    assert!(String::from_utf8(body).unwrap().starts_with("template=content pjax=true"));
    assert!(harness.last_param().is_pjax);
}

// ---- Test 5: button permissions ----

#[tokio::test]
async fn test_nav_buttons_filtered_by_permission() {
    let harness = TestHarness::builder().with_user(editor()).build();
    let ctx = harness.request("/admin/info/users");
    let user = harness.composer.auth(&ctx).unwrap();
    let buttons = Buttons::from(vec![
        Button::new("New", "/info/users/new"),
        Button::new("Settings", "/config"),
        Button::new("Menu", ""),
    ]);

    harness
        .composer
        .execute(
            &ctx,
            &MockConnection,
            &buttons,
            &user,
            Panel::default(),
            RenderOptions::default(),
        )
        .await
        .unwrap();

    let titles: Vec<String> = harness
        .last_param()
        .buttons
        .iter()
        .map(|b| b.title.clone())
        .collect();
    assert_eq!(titles, vec!["New", "Menu"]);
}

// ---- Test 6: failures ----

#[tokio::test]
async fn test_missing_theme_is_an_error() {
    let harness = TestHarness::new();
    let mut config = AdminConfig::default();
    config.site.theme = "missing".to_string();
    harness.composer.update_config(config);

    let ctx = harness.request("/admin/");
    let user = harness.composer.auth(&ctx).unwrap();
    let err = harness
        .composer
        .execute_with_custom_menu(
            &ctx,
            &Buttons::default(),
            &user,
            Panel::default(),
            Menu::default(),
            RenderOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(err, AdminError::ThemeNotFound(name) if name == "missing"));
    assert_eq!(harness.template.executions(), 0);
}

#[tokio::test]
async fn test_menu_builder_error_propagates() {
    let harness = TestHarness::builder().with_failing_menu().build();
    let ctx = harness.request("/admin/");
    let user = harness.composer.auth(&ctx).unwrap();

    let err = harness
        .composer
        .execute(
            &ctx,
            &MockConnection,
            &Buttons::default(),
            &user,
            Panel::default(),
            RenderOptions::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::Menu { .. }));
}

#[test]
fn test_unauthenticated_request_is_rejected() {
    let harness = TestHarness::builder().unauthenticated().build();
    let ctx = harness.request("/admin/");
    assert!(matches!(
        harness.composer.auth(&ctx),
        Err(AdminError::Unauthenticated)
    ));

    let ctx = ctx.with_user(editor());
    assert_eq!(harness.composer.auth(&ctx).unwrap().name, "editor");
}
