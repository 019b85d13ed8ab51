//! HTML pages and route bodies.


use axum::response::{Html, IntoResponse, Response};
use portcullis::{Principal, RouteCatalog, paths};

pub const LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Login</title>
</head>
<body>
  <h1>Login</h1>
  <form method="post" action="/login">
    <label for="username">Username</label>
    <input type="text" id="username" name="username" required>
    <label for="password">Password</label>
    <input type="password" id="password" name="password" required>
    <button type="submit">Login</button>
  </form>
</body>
</html>
"#;

pub const ADMIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Admin</title>
</head>
<body>
  <h1>Admin Page</h1>
  <p>This page is restricted to administrators.</p>
  <a href="/dashboard">Back to dashboard</a>
</body>
</html>
"#;

pub const HR_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>HR</title>
</head>
<body>
  <h1>HR Department</h1>
  <p>This page is restricted to members of the hr department.</p>
  <a href="/dashboard">Back to dashboard</a>
</body>
</html>
"#;

/// Body served once `path`'s policy has allowed the request.
pub fn protected_page(path: &str) -> Response {
    match path {
        paths::ADMIN => Html(ADMIN_HTML).into_response(),
        paths::HR => Html(HR_HTML).into_response(),
        paths::FINANCE_MANAGER => "Welcome to the Finance Manager route!".into_response(),
        paths::IT_CLEARANCE_2 => "Welcome to the IT Clearance Level 2 route!".into_response(),
        paths::LEGAL_DIRECTOR => "Welcome to the Legal Director route!".into_response(),
        paths::OPS_COMBINED => "Welcome to the Operations Combined route!".into_response(),
        paths::EXEC_CLEARANCE_3 => {
            "Welcome to the Executive Clearance Level 3 route!".into_response()
        }
        other => format!("Welcome to the {other} route!").into_response(),
    }
}

/// Dashboard for `principal`, listing the catalogue routes it may open.
pub fn dashboard(principal: &Principal, catalog: &RouteCatalog) -> Html<String> {
    let esc = |s: &str| html_escape::encode_text(s).into_owned();

    let items: String = catalog
        .routes()
        .map(|route| {
            let mark = if route.policy.evaluate(principal).is_allowed() {
                "allowed"
            } else {
                "denied"
            };
            let path = html_escape::encode_double_quoted_attribute(&route.path);
            format!(
                "    <li><a href=\"{path}\">{}</a> <small>({mark})</small></li>\n",
                esc(&route.path),
            )
        })
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Dashboard</title>
</head>
<body>
  <h1>Welcome, {username}</h1>
  <p>Role: {role} | Department: {department} | Clearance: {clearance} | Seniority: {seniority}</p>
  <ul>
{items}  </ul>
  <a href="/logout">Logout</a>
</body>
</html>
"#,
        username = esc(principal.username.as_str()),
        role = principal.role,
        department = esc(principal.department.as_str()),
        clearance = principal.clearance,
        seniority = principal.seniority,
    ))
}
