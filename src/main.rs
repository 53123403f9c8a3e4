use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input, Password};
use dotenvy::dotenv;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use validator::Validate;

use vigil::editor::RoleEditor;
use vigil::guard::load_effective_permissions;
use vigil::navigation::{NAV_ITEMS, filter_navigation};
use vigil::session::{Session, SessionStore};
use vigil_api::ApiClient;
use vigil_config::SessionConfig;
use vigil_core::schema::{NodeSpec, SCHEMA, parse_path};
use vigil_core::tree::PermissionTree;
use vigil_models::ids::RoleId;
use vigil_models::users::LoginRequest;

#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "Vigil - administrative console for the municipal video-surveillance platform", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session locally
    Login {
        /// Operator login (prompted when omitted)
        #[arg(short, long)]
        login: Option<String>,

        /// Password (prompted securely when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the current operator
    Whoami,
    /// List the console sections visible to the current operator
    Nav,
    /// Manage roles and their permission trees
    Roles {
        #[command(subcommand)]
        command: RolesCommand,
    },
}

#[derive(Subcommand)]
enum RolesCommand {
    /// List all roles
    List,
    /// Show one role with its full permission tree
    Show {
        /// Role id
        id: i64,
    },
    /// Create a role (all permissions denied unless granted here)
    Create {
        /// Role name
        #[arg(short, long)]
        name: String,

        /// Role description
        #[arg(short, long)]
        description: Option<String>,

        /// Permission paths to grant, e.g. `monitoring.view` (repeatable)
        #[arg(long = "grant", value_name = "PATH")]
        grant: Vec<String>,
    },
    /// Edit a role's fields and permission flags
    Edit {
        /// Role id
        id: i64,

        /// New role name
        #[arg(long)]
        name: Option<String>,

        /// New role description
        #[arg(long)]
        description: Option<String>,

        /// Permission paths to grant (repeatable)
        #[arg(long = "grant", value_name = "PATH")]
        grant: Vec<String>,

        /// Permission paths to revoke (repeatable)
        #[arg(long = "revoke", value_name = "PATH")]
        revoke: Vec<String>,
    },
    /// Delete a role (refused while users are assigned to it)
    Delete {
        /// Role id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let api = ApiClient::from_env()?;
    let store = SessionStore::new(&SessionConfig::from_env());

    match cli.command {
        Commands::Login { login, password } => handle_login(&api, &store, login, password).await,
        Commands::Logout => {
            store.clear().context("could not remove the session file")?;
            println!("Signed out.");
            Ok(())
        }
        Commands::Whoami => handle_whoami(&store),
        Commands::Nav => handle_nav(&api, &store).await,
        Commands::Roles { command } => match command {
            RolesCommand::List => handle_roles_list(&api).await,
            RolesCommand::Show { id } => handle_roles_show(&api, RoleId::new(id)).await,
            RolesCommand::Create {
                name,
                description,
                grant,
            } => handle_roles_create(&api, name, description, grant).await,
            RolesCommand::Edit {
                id,
                name,
                description,
                grant,
                revoke,
            } => handle_roles_edit(&api, RoleId::new(id), name, description, grant, revoke).await,
            RolesCommand::Delete { id, yes } => {
                handle_roles_delete(&api, RoleId::new(id), yes).await
            }
        },
    }
}

fn current_session(store: &SessionStore) -> anyhow::Result<Session> {
    store
        .load()
        .ok_or_else(|| anyhow!("no active session, sign in with `vigil login`"))
}

async fn handle_login(
    api: &ApiClient,
    store: &SessionStore,
    login: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let login = match login {
        Some(login) => login,
        None => Input::new().with_prompt("Login").interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let request = LoginRequest { login, password };
    request.validate()?;

    let user = api.login(&request).await?;
    let session = Session::open(user);
    store
        .save(&session)
        .context("could not write the session file")?;

    println!("✅ Signed in as {} ({})", session.user.full_name, session.user.login);
    if session.user.role_id.is_none() {
        println!("⚠️  No role assigned - all permission-gated sections will be hidden");
    }
    Ok(())
}

fn handle_whoami(store: &SessionStore) -> anyhow::Result<()> {
    let session = current_session(store)?;
    let user = &session.user;

    println!("{} ({})", user.full_name, user.login);
    if let Some(email) = &user.email {
        println!("   Email:    {}", email);
    }
    if let Some(company) = &user.company {
        println!("   Company:  {}", company);
    }
    if let Some(position) = &user.position {
        println!("   Position: {}", position);
    }
    match user.role_id {
        Some(role_id) => println!("   Role id:  {}", role_id),
        None => println!("   Role id:  none"),
    }
    println!("   Signed in since {}", session.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    Ok(())
}

async fn handle_nav(api: &ApiClient, store: &SessionStore) -> anyhow::Result<()> {
    let session = current_session(store)?;
    let permissions = load_effective_permissions(api, &session.user).await;
    let visible = filter_navigation(&permissions, NAV_ITEMS);

    println!("Visible sections for {}:", session.user.login);
    for entry in visible {
        println!("   {:<16} {}", entry.route, entry.label);
    }
    Ok(())
}

async fn handle_roles_list(api: &ApiClient) -> anyhow::Result<()> {
    let roles = api.list_roles().await?;

    if roles.is_empty() {
        println!("No roles defined yet.");
        return Ok(());
    }

    println!(
        "{:>5}  {:<30} {:>6}  {:>7}  {}",
        "id", "name", "users", "grants", "updated"
    );
    for role in roles {
        println!(
            "{:>5}  {:<30} {:>6}  {:>7}  {}",
            role.id,
            role.name,
            role.users_count,
            role.permissions.granted_paths().len(),
            role.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

async fn handle_roles_show(api: &ApiClient, id: RoleId) -> anyhow::Result<()> {
    let role = api.get_role(id).await?;

    println!("Role {}: {}", role.id, role.name);
    if let Some(description) = &role.description {
        if !description.is_empty() {
            println!("   {}", description);
        }
    }
    println!(
        "   {} assigned user(s), updated {}",
        role.users_count,
        role.updated_at.format("%Y-%m-%d %H:%M")
    );
    println!();
    print_tree(&role.permissions);
    Ok(())
}

async fn handle_roles_create(
    api: &ApiClient,
    name: String,
    description: Option<String>,
    grant: Vec<String>,
) -> anyhow::Result<()> {
    let mut editor = RoleEditor::create();
    editor.name = name;
    editor.description = description.unwrap_or_default();
    apply_toggles(&mut editor, &grant, &[])?;

    let role = editor.save(api).await?;
    println!("✅ Role '{}' created with id {}", role.name, role.id);
    Ok(())
}

async fn handle_roles_edit(
    api: &ApiClient,
    id: RoleId,
    name: Option<String>,
    description: Option<String>,
    grant: Vec<String>,
    revoke: Vec<String>,
) -> anyhow::Result<()> {
    let mut editor = RoleEditor::load(api, id).await?;

    let fields_changed = name.is_some() || description.is_some();
    if let Some(name) = name {
        editor.name = name;
    }
    if let Some(description) = description {
        editor.description = description;
    }
    apply_toggles(&mut editor, &grant, &revoke)?;

    if !fields_changed && !editor.is_dirty() {
        println!("Nothing to change for role {}.", id);
        return Ok(());
    }

    let role = editor.save(api).await?;
    println!("✅ Role '{}' updated", role.name);
    Ok(())
}

async fn handle_roles_delete(api: &ApiClient, id: RoleId, yes: bool) -> anyhow::Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete role {}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    api.delete_role(id).await?;
    println!("✅ Role {} deleted", id);
    Ok(())
}

fn apply_toggles(
    editor: &mut RoleEditor,
    grant: &[String],
    revoke: &[String],
) -> anyhow::Result<()> {
    for dotted in grant {
        let path = parse_path(dotted)?;
        editor.grant(&path)?;
    }
    for dotted in revoke {
        let path = parse_path(dotted)?;
        editor.revoke(&path)?;
    }
    Ok(())
}

/// Renders the full permission tree with grant marks, in schema order.
fn print_tree(tree: &PermissionTree) {
    fn walk(
        nodes: &'static [NodeSpec],
        tree: &PermissionTree,
        prefix: &mut Vec<&'static str>,
        depth: usize,
    ) {
        for node in nodes {
            let indent = "    ".repeat(depth);
            match node {
                NodeSpec::Leaf(key) => {
                    prefix.push(key);
                    let mark = if tree.is_granted(prefix) { "✓" } else { "·" };
                    println!("   {}{} {}", indent, mark, key);
                    prefix.pop();
                }
                NodeSpec::Group { key, children } => {
                    println!("   {}{}", indent, key);
                    prefix.push(key);
                    walk(children, tree, prefix, depth + 1);
                    prefix.pop();
                }
            }
        }
    }

    walk(SCHEMA, tree, &mut Vec::new(), 0);
}
