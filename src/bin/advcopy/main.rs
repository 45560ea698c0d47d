//! Advcopy CLI - Tool for inspecting project snapshots and previewing copy plans.

use advcopy::prelude::{
    classify_context, current_shot, plan_copy_to_env, plan_copy_to_scene, plan_copy_to_shot,
    plan_move_to_all_scenes, scene_span, target_chain, ContainerId, Convention, CopyPlan, Forest,
    KeySubject, ObjectId, ProjectSnapshot, Role, RootName, SceneId, ShotId, TargetLevel,
    TargetRequest, KEY_INTERPOLATION, VISIBILITY_CHANNELS,
};
use std::env;
use std::path::Path;
use tracing::info;

fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse global flags
    let mut filtered_args: Vec<&str> = Vec::new();
    let mut level = "info";
    let mut convention_name = "prefix";
    let mut role_name = "model";
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-v" | "--verbose" => level = "debug",
            "-vv" | "--trace" => level = "trace",
            "-q" | "--quiet" => level = "off",
            "--convention" => {
                i += 1;
                match args.get(i) {
                    Some(name) => convention_name = name,
                    None => {
                        eprintln!("Error: --convention needs a value (prefix or suffix)");
                        std::process::exit(1);
                    }
                }
            }
            "--role" => {
                i += 1;
                match args.get(i) {
                    Some(name) => role_name = name,
                    None => {
                        eprintln!("Error: --role needs a value (model, vfx, actor or prop)");
                        std::process::exit(1);
                    }
                }
            }
            other => filtered_args.push(other),
        }
        i += 1;
    }

    let json_mode = filtered_args.iter().any(|&s| s == "--json" || s == "-j");
    if json_mode {
        level = "off";
    }
    init_tracing(level);

    let convention = match convention_name {
        "prefix" => Convention::prefix(),
        "suffix" => Convention::suffix(),
        other => {
            eprintln!("Unknown convention: {} (expected prefix or suffix)", other);
            std::process::exit(1);
        }
    };
    let Some(role) = Role::parse(role_name) else {
        eprintln!("Unknown role: {} (expected model, vfx, actor or prop)", role_name);
        std::process::exit(1);
    };

    if filtered_args.is_empty() {
        print_help();
        return;
    }

    match filtered_args[0] {
        // Info command - snapshot summary
        "info" | "i" => {
            if filtered_args.len() < 2 {
                eprintln!("Error: missing file argument");
                eprintln!("Usage: advcopy-cli info <snapshot.json>");
                std::process::exit(1);
            }
            cmd_info(filtered_args[1]);
        }

        // Tree command - container hierarchy
        "tree" | "t" => {
            if filtered_args.len() < 2 {
                eprintln!("Error: missing file argument");
                eprintln!("Usage: advcopy-cli tree <snapshot.json>");
                std::process::exit(1);
            }
            cmd_tree(filtered_args[1]);
        }

        // Shot command - window governing a frame
        "shot" | "s" => {
            if filtered_args.len() < 2 {
                eprintln!("Error: missing file argument");
                eprintln!("Usage: advcopy-cli shot <snapshot.json> [frame]");
                std::process::exit(1);
            }
            cmd_shot(filtered_args[1], filtered_args.get(2).copied());
        }

        // Classify command - working context of an object
        "classify" | "c" => {
            if filtered_args.len() < 3 {
                eprintln!("Error: missing arguments");
                eprintln!("Usage: advcopy-cli classify <snapshot.json> <object>");
                std::process::exit(1);
            }
            cmd_classify(filtered_args[1], filtered_args[2], &convention);
        }

        // Resolve command - preview a target chain
        "resolve" | "r" => {
            if filtered_args.len() < 3 {
                eprintln!("Error: missing arguments");
                eprintln!("Usage: advcopy-cli resolve <snapshot.json> <scene> [shot] [--role <role>]");
                std::process::exit(1);
            }
            cmd_resolve(
                filtered_args[1],
                filtered_args[2],
                filtered_args.get(3).copied(),
                role,
                &convention,
            );
        }

        // Plan command - full copy plan for an object
        "plan" | "p" => {
            let positional: Vec<&str> = filtered_args
                .iter()
                .skip(1)
                .filter(|&&s| s != "--json" && s != "-j")
                .copied()
                .collect();
            if positional.len() < 3 {
                eprintln!("Error: missing arguments");
                eprintln!("Usage: advcopy-cli plan <snapshot.json> <object> <shot|scene|all|env> [--json]");
                std::process::exit(1);
            }
            cmd_plan(positional[0], positional[1], positional[2], &convention, json_mode);
        }

        // Help
        "help" | "h" | "-h" | "--help" => print_help(),

        // Default: if file exists, show info; otherwise error
        _ => {
            if Path::new(filtered_args[0]).exists() {
                cmd_info(filtered_args[0]);
            } else {
                eprintln!("Unknown command: {}", filtered_args[0]);
                eprintln!();
                print_help();
                std::process::exit(1);
            }
        }
    }
}

fn print_help() {
    let date = option_env!("ADVCOPY_BUILD_DATE").unwrap_or("unknown");
    let time = option_env!("ADVCOPY_BUILD_TIME").unwrap_or("unknown");
    println!(
        "advcopy {} (built {} {}) - container hierarchy resolver and copy planner",
        env!("CARGO_PKG_VERSION"),
        date,
        time
    );
    println!();
    println!("USAGE:");
    println!("    advcopy-cli [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    i, info     <file>                   Show snapshot summary and root counts");
    println!("    t, tree     <file>                   Show the container hierarchy with members");
    println!("    s, shot     <file> [frame]           Show the shot window governing a frame");
    println!("    c, classify <file> <object>          Classify an object's working context");
    println!("    r, resolve  <file> <scene> [shot]    Preview a target chain without creating it");
    println!("    p, plan     <file> <object> <action> Plan a copy (action: shot, scene, all, env)");
    println!("    h, help                              Show this help");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose          Show debug output");
    println!("    -vv, --trace           Show trace output (very verbose)");
    println!("    -q, --quiet            Suppress diagnostics");
    println!("    --convention <name>    Naming convention: prefix or suffix (default: prefix)");
    println!("    --role <role>          Role for resolve: model, vfx, actor, prop (default: model)");
    println!("    -j, --json             Machine-readable plan output");
    println!();
    println!("EXAMPLES:");
    println!("    advcopy-cli info project.json             # Quick overview");
    println!("    advcopy-cli tree project.json             # See the hierarchy");
    println!("    advcopy-cli shot project.json 30          # Which shot covers frame 30");
    println!("    advcopy-cli classify project.json HERO    # MODEL, VFX, ACTOR or PROP");
    println!("    advcopy-cli resolve project.json SC17 SH100");
    println!("    advcopy-cli plan project.json HERO shot --json");
    println!("    advcopy-cli -v plan project.json HERO all # Verbose planning");
    println!();
    println!("NOTES:");
    println!("    - Passing a .json file directly is equivalent to 'info'");
    println!("    - Plans are previews; applying them is the host's job");
    println!("    - RUST_LOG overrides the verbosity flags");
}

fn load_snapshot(path: &str) -> ProjectSnapshot {
    info!("Loading snapshot: {}", path);
    match ProjectSnapshot::load(path) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Failed to load {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn build_forest(snapshot: &ProjectSnapshot) -> Forest {
    match snapshot.build() {
        Ok(forest) => forest,
        Err(e) => {
            eprintln!("Invalid snapshot: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_info(path: &str) {
    let snapshot = load_snapshot(path);
    let forest = build_forest(&snapshot);

    println!("Snapshot: {}", path);
    println!(
        "Frames: {}-{} (current {})",
        snapshot.frame_start, snapshot.frame_end, snapshot.current_frame
    );
    println!();

    let mut counts = RootCounts::default();
    for id in forest.roots() {
        let Some(container) = forest.container(id) else {
            continue;
        };
        match RootName::parse(container.name()) {
            Some(RootName::Scene { .. }) => counts.scene += 1,
            Some(RootName::Location { .. }) => counts.location += 1,
            Some(RootName::Environment { .. }) => counts.environment += 1,
            Some(RootName::Group { .. }) => counts.group += 1,
            _ => counts.other += 1,
        }
    }

    println!("Roots:");
    println!("  Scenes:       {}", counts.scene);
    println!("  Locations:    {}", counts.location);
    println!("  Environments: {}", counts.environment);
    println!("  Groups:       {}", counts.group);
    if counts.other > 0 {
        println!("  Other:        {}", counts.other);
    }
    println!();

    let camera_bound = snapshot.markers.iter().filter(|m| m.is_camera_bound()).count();
    println!("Total containers: {}", forest.container_count());
    println!("Objects: {}", forest.object_count());
    println!("Markers: {} ({} camera-bound)", snapshot.markers.len(), camera_bound);
}

/// Root counts for the info summary
#[derive(Default)]
struct RootCounts {
    scene: usize,
    location: usize,
    environment: usize,
    group: usize,
    other: usize,
}

fn cmd_tree(path: &str) {
    let snapshot = load_snapshot(path);
    let forest = build_forest(&snapshot);

    println!("Snapshot: {}", path);
    println!();

    for root in forest.roots() {
        print_tree(&forest, root, 0);
    }
}

fn print_tree(forest: &Forest, id: ContainerId, depth: usize) {
    let indent = "  ".repeat(depth);
    let Some(container) = forest.container(id) else {
        return;
    };

    let tag = match RootName::parse(container.name()) {
        Some(RootName::Scene { scene, location }) => format!(" [scene {} @ {}]", scene, location),
        Some(RootName::Location { name }) => format!(" [location {}]", name),
        Some(RootName::Environment { name }) => format!(" [environment {}]", name),
        Some(RootName::Group { tag: Some(tag) }) => format!(" [group {}]", tag),
        Some(RootName::Group { tag: None }) => " [group]".to_string(),
        _ => String::new(),
    };
    println!("{}{}{}", indent, container.name(), tag);

    for &member in container.members() {
        if let Some(object) = forest.object(member) {
            println!("{}  - {}", indent, object.name());
        }
    }
    for &child in container.children() {
        print_tree(forest, child, depth + 1);
    }
}

fn cmd_shot(path: &str, frame: Option<&str>) {
    let snapshot = load_snapshot(path);
    let frame = match frame {
        Some(text) => match text.parse::<i32>() {
            Ok(frame) => frame,
            Err(_) => {
                eprintln!("Error: invalid frame '{}'", text);
                std::process::exit(1);
            }
        },
        None => snapshot.current_frame,
    };

    let Some(window) = current_shot(&snapshot.markers, frame, snapshot.frame_end) else {
        println!("No camera marker governs frame {}", frame);
        return;
    };

    println!("Frame {} sits in {}", frame, window.marker);
    println!("  Scene: {}", window.scene);
    println!("  Shot:  {}", window.shot);
    println!(
        "  Span:  {}-{} ({} frames)",
        window.span.start(),
        window.span.end(),
        window.span.frame_count()
    );
    if let Some(span) = scene_span(&snapshot.markers, &window.scene, snapshot.frame_end) {
        println!(
            "  Scene span: {}-{} ({} frames)",
            span.start(),
            span.end(),
            span.frame_count()
        );
    }
}

fn cmd_classify(path: &str, name: &str, convention: &Convention) {
    let snapshot = load_snapshot(path);
    let forest = build_forest(&snapshot);

    let Some(object) = forest.object_by_name(name) else {
        eprintln!("Object not found: {}", name);
        std::process::exit(1);
    };

    let role = classify_context(&forest, object, convention.classify_rules());
    println!("Object: {}", name);
    println!("Context: {} ({} convention)", role, convention.name());

    let Some(scene_object) = forest.object(object) else {
        return;
    };
    if scene_object.memberships().is_empty() {
        println!("Memberships: none");
        return;
    }
    println!();
    println!("Memberships:");
    for &membership in scene_object.memberships() {
        let chain: Vec<&str> = forest
            .ancestry(membership)
            .filter_map(|id| forest.container(id).map(|c| c.name()))
            .collect();
        println!("  {}", chain.join(" < "));
    }
}

fn cmd_resolve(path: &str, scene: &str, shot: Option<&str>, role: Role, convention: &Convention) {
    let snapshot = load_snapshot(path);
    let forest = build_forest(&snapshot);

    let Some(scene) = SceneId::parse(scene) else {
        eprintln!("Error: '{}' is not a scene id (expected SC<digits>)", scene);
        std::process::exit(1);
    };
    let level = match shot {
        Some(text) => match ShotId::parse(text) {
            Some(shot) => TargetLevel::Shot(shot),
            None => {
                eprintln!("Error: '{}' is not a shot id (expected SH<digits>)", text);
                std::process::exit(1);
            }
        },
        None => TargetLevel::Scene,
    };

    let request = TargetRequest { scene, role, level };
    let steps = match target_chain(&forest, convention, &request) {
        Ok(Some(steps)) => steps,
        Ok(None) => {
            println!(
                "No target: scene {} has no root here, or the {} convention has no {} chain",
                request.scene,
                convention.name(),
                role
            );
            return;
        }
        Err(e) => {
            eprintln!("Resolve failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("Chain for {} in {} ({} convention):", role, request.scene, convention.name());
    for step in &steps {
        let mark = if step.exists { "exists" } else { "create" };
        println!("  [{}] {}", mark, step.name);
    }
}

fn cmd_plan(path: &str, name: &str, action: &str, convention: &Convention, json_mode: bool) {
    let snapshot = load_snapshot(path);
    let mut forest = build_forest(&snapshot);

    let Some(object) = forest.object_by_name(name) else {
        eprintln!("Object not found: {}", name);
        std::process::exit(1);
    };

    let plan = match action {
        "shot" => plan_copy_to_shot(
            &mut forest,
            convention,
            object,
            &snapshot.markers,
            snapshot.current_frame,
            snapshot.frame_end,
        ),
        "scene" => plan_copy_to_scene(
            &mut forest,
            convention,
            object,
            &snapshot.markers,
            snapshot.current_frame,
            snapshot.frame_end,
        ),
        "all" => plan_move_to_all_scenes(&mut forest, convention, object),
        "env" => plan_copy_to_env(&forest, convention, object),
        other => {
            eprintln!("Unknown action: {} (expected shot, scene, all or env)", other);
            std::process::exit(1);
        }
    };

    let plan = match plan {
        Ok(Some(plan)) => plan,
        Ok(None) => {
            println!("Nothing to do for '{}' ({})", name, action);
            return;
        }
        Err(e) => {
            eprintln!("Planning failed: {}", e);
            std::process::exit(1);
        }
    };

    if json_mode {
        print_plan_json(&forest, name, action, &plan);
    } else {
        print_plan(&forest, &plan);
    }
}

fn display_object(forest: &Forest, id: ObjectId) -> String {
    forest
        .object(id)
        .map(|o| o.name().to_string())
        .unwrap_or_else(|| id.to_string())
}

fn display_container(forest: &Forest, id: ContainerId) -> String {
    forest
        .container(id)
        .map(|c| c.name().to_string())
        .unwrap_or_else(|| id.to_string())
}

fn display_subject(forest: &Forest, subject: &KeySubject) -> String {
    match subject {
        KeySubject::Object(id) => display_object(forest, *id),
        KeySubject::PlannedCopy(name) => format!("{} (copy)", name),
    }
}

fn print_plan(forest: &Forest, plan: &CopyPlan) {
    println!("Steps:");
    if plan.steps.is_empty() {
        println!("  (none)");
    }
    for step in &plan.steps {
        println!(
            "  {} -> {} (as {})",
            display_object(forest, step.source),
            display_container(forest, step.target),
            step.copy_name
        );
    }

    if !plan.visibility.is_empty() {
        println!();
        println!("Visibility ({} keys on {}):", KEY_INTERPOLATION, VISIBILITY_CHANNELS.join(", "));
        for toggle in &plan.visibility {
            let action = if toggle.hide { "hide" } else { "show" };
            let keys: Vec<String> = toggle
                .keyframes()
                .iter()
                .map(|k| format!("{}:{}", k.frame, if k.hidden { "hidden" } else { "visible" }))
                .collect();
            println!(
                "  {} {} over {}-{} [{}]",
                action,
                display_subject(forest, &toggle.subject),
                toggle.span.start(),
                toggle.span.end(),
                keys.join(" ")
            );
        }
    }

    if !plan.skipped.is_empty() {
        println!();
        println!("Skipped roots:");
        for name in &plan.skipped {
            println!("  {}", name);
        }
    }

    if plan.remove_source {
        println!();
        println!("Remove the source object after copying.");
    }
    if let Some((object, container)) = plan.unlink_source {
        println!();
        println!(
            "Unlink {} from {} after copying.",
            display_object(forest, object),
            display_container(forest, container)
        );
    }
}

fn print_plan_json(forest: &Forest, object: &str, action: &str, plan: &CopyPlan) {
    let steps: Vec<serde_json::Value> = plan
        .steps
        .iter()
        .map(|step| {
            serde_json::json!({
                "source": display_object(forest, step.source),
                "target": display_container(forest, step.target),
                "copy_name": step.copy_name,
            })
        })
        .collect();

    let visibility: Vec<serde_json::Value> = plan
        .visibility
        .iter()
        .map(|toggle| {
            let keys: Vec<serde_json::Value> = toggle
                .keyframes()
                .iter()
                .map(|k| serde_json::json!({ "frame": k.frame, "hidden": k.hidden }))
                .collect();
            let subject = match &toggle.subject {
                KeySubject::Object(id) => {
                    serde_json::json!({ "object": display_object(forest, *id) })
                }
                KeySubject::PlannedCopy(name) => serde_json::json!({ "copy": name }),
            };
            serde_json::json!({
                "subject": subject,
                "hide": toggle.hide,
                "span": [toggle.span.start(), toggle.span.end()],
                "channels": VISIBILITY_CHANNELS,
                "interpolation": KEY_INTERPOLATION,
                "keys": keys,
            })
        })
        .collect();

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "object": object,
            "action": action,
            "steps": steps,
            "visibility": visibility,
            "skipped": plan.skipped,
            "remove_source": plan.remove_source,
            "unlink_source": plan.unlink_source.map(|(object, container)| {
                serde_json::json!({
                    "object": display_object(forest, object),
                    "container": display_container(forest, container),
                })
            }),
        }))
        .unwrap_or_default()
    );
}
