use bevy::prelude::*;
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

use crate::config::PlaybackConfig;
use crate::error::Result;
use crate::playback::PlaybackController;
use crate::pose::PoseRenderer;
use crate::store::FrameStore;
use crate::types::{HandSide, Position};

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// 3cm spheres
const JOINT_RADIUS: f32 = 0.015;

#[derive(Resource)]
pub struct ReplayData {
    pub controller: PlaybackController<PoseRenderer>,
    pub joint_radius: f32,
    pub debug_text: bool,
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Open a window replaying `store`. Space plays/pauses, Right steps one frame.
pub fn visualize_hands(store: FrameStore, config: &PlaybackConfig) -> Result<()> {
    let renderer = PoseRenderer::new(store.topology());
    let controller = PlaybackController::from_config(store, config, renderer)?;

    App::new()
        .insert_resource(ReplayData {
            controller,
            joint_radius: JOINT_RADIUS,
            debug_text: false,
        })
        .add_plugins(DefaultPlugins)
        .add_plugins(PanOrbitCameraPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (update_main, draw_hands, update_debug_text).chain())
        .run();
    Ok(())
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Component)]
struct DebugText;

fn setup(mut commands: Commands) {
    //// Orbit camera, close enough for a pair of hands
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_xyz(0., 0.3, 0.8).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        PanOrbitCamera::default(),
    ));

    // draw instructions
    commands.spawn(
        TextBundle::from_section(
            "Press 'Space' to play/pause\n\
            Press 'Right' to step one frame\n\
            Press 'D' to toggle debug text\n",
            TextStyle {
                font_size: 15.,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            right: Val::Px(12.0),
            ..default()
        }),
    );

    // draw debug text
    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 17.,
                color: Color::rgba(1.0, 1.0, 1.0, 0.5),
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        }),
        DebugText,
    ));
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn to_vec3(position: &Position) -> Vec3 {
    Vec3::new(position.x as f32, position.y as f32, position.z as f32)
}

fn hand_color(side: HandSide) -> Color {
    match side {
        HandSide::Left => Color::RED,
        HandSide::Right => Color::BLUE,
    }
}

/// Draw world axes (red, green, blue) at the origin for reference.
fn draw_reference_axes(gizmos: &mut Gizmos, length: f32) {
    gizmos.line(Vec3::ZERO, Vec3::X * length, Color::RED);
    gizmos.line(Vec3::ZERO, Vec3::Y * length, Color::GREEN);
    gizmos.line(Vec3::ZERO, Vec3::Z * length, Color::BLUE);
}

fn draw_hands(mut gizmos: Gizmos, data: Res<ReplayData>) {
    let renderer = data.controller.renderer();
    for side in HandSide::BOTH {
        let pose = renderer.hand(side);
        let color = hand_color(side);
        for joint in pose.joints.iter().flatten() {
            gizmos.sphere(to_vec3(joint), Quat::IDENTITY, data.joint_radius, color);
        }
        for (start, end) in pose.bones.iter().flatten() {
            gizmos.line(to_vec3(start), to_vec3(end), color);
        }
    }

    draw_reference_axes(&mut gizmos, 0.1);
}

fn update_main(keyboard: Res<ButtonInput<KeyCode>>, time: Res<Time>, mut data: ResMut<ReplayData>) {
    if keyboard.just_pressed(KeyCode::Space) {
        data.controller.on_toggle_play();
    }

    if keyboard.just_released(KeyCode::ArrowRight) {
        data.controller.step_forward();
    }

    if keyboard.just_released(KeyCode::KeyD) {
        data.debug_text = !data.debug_text;
    }

    data.controller.on_time_advanced(time.delta_seconds_f64());
}

fn update_debug_text(mut query: Query<&mut Text, With<DebugText>>, data: Res<ReplayData>) {
    let state = data.controller.state();
    let store = data.controller.store();
    let mut t = String::new();
    if data.debug_text {
        t += &format!(
            "Frame: {} ({})\n",
            state.current_frame,
            if state.is_playing { "playing" } else { "paused" }
        );
        t += &format!(
            "Capture: {} frames, {:?}..={:?}\n",
            store.len(),
            store.first_index(),
            store.last_index()
        );
        if let Some(frame) = state.last_emitted {
            for (side, geometry) in data.controller.frame_geometry(frame) {
                t += &format!(
                    "{:.<10} {:>3} joints {:>3} bones\n",
                    side.as_str(),
                    geometry.joints.len(),
                    geometry.bones.len()
                );
            }
        }
    }
    for mut text in &mut query {
        text.sections[0].value = t.clone();
    }
}
