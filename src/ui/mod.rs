//! UI plugin - camera, title, score labels and the pause / game over banner.

use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy::render::view::Hdr;

use crate::game::{ArcadeSet, BANNER_COLOR, LABEL_COLOR, MaxScoreText, ScoreText, StatusText};
use crate::session::{FrameView, GameSession};

const FONT: &str = "fonts/FiraSans-Bold.ttf";

/// Plugin for the HUD.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_system).add_systems(
            Update,
            (update_score_text, update_status_text)
                .chain()
                .in_set(ArcadeSet::Present),
        );
    }
}

/// Banner text for the current frame, if any.
pub fn status_banner(view: &FrameView) -> Option<&'static str> {
    if view.game_over {
        Some("GAME OVER")
    } else if view.paused {
        Some("PAUSED")
    } else {
        None
    }
}

fn label(asset_server: &AssetServer, value: impl Into<String>, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(value),
        TextFont {
            font: asset_server.load(FONT),
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

/// Initial setup system - camera and HUD.
fn setup_system(mut commands: Commands, asset_server: Res<AssetServer>, session: Res<GameSession>) {
    // HDR camera with bloom so the additive shapes glow
    commands.spawn((
        Camera2d,
        Hdr,
        Bloom {
            intensity: 0.3,
            low_frequency_boost: 0.6,
            low_frequency_boost_curvature: 0.5,
            high_pass_frequency: 0.8,
            ..default()
        },
    ));

    // Title and score row along the top
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            top: Val::Px(20.0),
            padding: UiRect::horizontal(Val::Percent(5.0)),
            justify_content: JustifyContent::SpaceBetween,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|parent| {
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    ..default()
                })
                .with_children(|column| {
                    column.spawn(label(&asset_server, "SCORE", 16.0, LABEL_COLOR));
                    column.spawn((
                        label(&asset_server, "0", 32.0, Color::WHITE),
                        ScoreText,
                    ));
                });

            parent.spawn(label(&asset_server, "SNAKE", 48.0, BANNER_COLOR));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::FlexEnd,
                    ..default()
                })
                .with_children(|column| {
                    column.spawn(label(&asset_server, "BEST", 16.0, LABEL_COLOR));
                    column.spawn((
                        label(
                            &asset_server,
                            session.max_score().to_string(),
                            32.0,
                            Color::WHITE,
                        ),
                        MaxScoreText,
                    ));
                });
        });

    // Centered banner, hidden while playing
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                label(&asset_server, "", 60.0, BANNER_COLOR),
                Visibility::Hidden,
                StatusText,
            ));
        });

    // Controls hint along the bottom
    commands.spawn((
        label(
            &asset_server,
            "Arrows / WASD or swipe to steer  -  P to pause  -  Space to dash",
            16.0,
            LABEL_COLOR,
        ),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(20.0),
            left: Val::Percent(5.0),
            ..default()
        },
    ));
}

/// System to update the score displays.
fn update_score_text(
    session: Res<GameSession>,
    mut score_query: Query<&mut Text, (With<ScoreText>, Without<MaxScoreText>)>,
    mut max_score_query: Query<&mut Text, (With<MaxScoreText>, Without<ScoreText>)>,
) {
    let view = session.view();
    if let Ok(mut text) = score_query.single_mut() {
        text.0 = view.score.to_string();
    }
    if let Ok(mut text) = max_score_query.single_mut() {
        text.0 = view.max_score.to_string();
    }
}

fn update_status_text(
    session: Res<GameSession>,
    mut query: Query<(&mut Text, &mut Visibility), With<StatusText>>,
) {
    let Ok((mut text, mut visibility)) = query.single_mut() else {
        return;
    };
    match status_banner(session.view()) {
        Some(banner) => {
            text.0 = banner.to_string();
            *visibility = Visibility::Inherited;
        }
        None => *visibility = Visibility::Hidden,
    }
}
