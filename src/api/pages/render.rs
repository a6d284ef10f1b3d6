//! Server-rendered HTML

use std::fmt::Write;

use crate::domain::user::{User, UserStats};

/// Length of one focus session
pub const FOCUS_MINUTES: u32 = 25;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #111827; color: #f9fafb; margin: 0; }
header { display: flex; justify-content: space-between; align-items: center; padding: 1rem 2rem; background: #1f2937; }
header a { color: #93c5fd; margin-left: 1rem; text-decoration: none; }
main { max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }
form { display: flex; flex-direction: column; gap: 0.75rem; }
input { padding: 0.5rem; border-radius: 0.375rem; border: 1px solid #4b5563; background: #374151; color: inherit; }
button { padding: 0.6rem 1.2rem; border: 0; border-radius: 0.375rem; background: #2563eb; color: #fff; cursor: pointer; }
button.danger { background: #dc2626; }
button[hidden] { display: none; }
.error { background: #7f1d1d; padding: 0.75rem; border-radius: 0.375rem; }
.stats { display: flex; gap: 2rem; margin: 1.5rem 0; }
.stats div { text-align: center; }
.stats strong { display: block; font-size: 2rem; }
.timer { font-size: 4rem; font-variant-numeric: tabular-nums; text-align: center; margin: 1.5rem 0; }
.controls { display: flex; justify-content: center; gap: 1rem; }
table { width: 100%; border-collapse: collapse; }
th, td { padding: 0.5rem; text-align: left; border-bottom: 1px solid #374151; }
tr.me { background: #1e3a8a; }
"#;

const TIMER_SCRIPT: &str = r#"
(function () {
  const panel = document.getElementById('focus');
  const display = document.getElementById('timer');
  const startButton = document.getElementById('start');
  const giveUpButton = document.getElementById('give-up');
  const message = document.getElementById('message');
  const total = Number(panel.dataset.minutes) * 60;
  let remaining = total;
  let ticker = null;

  function render() {
    const minutes = String(Math.floor(remaining / 60)).padStart(2, '0');
    const seconds = String(remaining % 60).padStart(2, '0');
    display.textContent = minutes + ':' + seconds;
  }

  function update(stats) {
    document.getElementById('wins').textContent = stats.wins;
    document.getElementById('losses').textContent = stats.losses;
    document.getElementById('streak').textContent = stats.streak;
  }

  function stop() {
    clearInterval(ticker);
    ticker = null;
    remaining = total;
    startButton.hidden = false;
    giveUpButton.hidden = true;
    render();
  }

  function report(outcome, keepalive) {
    return fetch('/api/session/' + outcome, {
      method: 'POST',
      credentials: 'same-origin',
      keepalive: keepalive
    }).then(function (response) {
      if (response.status === 401) {
        window.location.href = '/login';
        return null;
      }
      return response.ok ? response.json() : null;
    });
  }

  startButton.addEventListener('click', function () {
    message.textContent = '';
    startButton.hidden = true;
    giveUpButton.hidden = false;
    ticker = setInterval(function () {
      remaining -= 1;
      render();
      if (remaining <= 0) {
        stop();
        report('win', false).then(function (stats) {
          if (stats) {
            update(stats);
            message.textContent = 'Session complete. Victory!';
          }
        });
      }
    }, 1000);
  });

  giveUpButton.addEventListener('click', function () {
    stop();
    report('loss', false).then(function (stats) {
      if (stats) {
        update(stats);
        message.textContent = 'You gave up. Streak reset.';
      }
    });
  });

  window.addEventListener('beforeunload', function () {
    if (ticker !== null) {
      report('loss', true);
    }
  });

  render();
})();
"#;

/// Escape text for safe inclusion in HTML content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, username: Option<&str>, body: &str) -> String {
    let nav = match username {
        Some(name) => format!(
            "<span>{}</span><nav><a href=\"/dashboard\">Dashboard</a>\
             <a href=\"/leaderboard\">Leaderboard</a><a href=\"/logout\">Log out</a></nav>",
            escape_html(name)
        ),
        None => "<nav><a href=\"/login\">Log in</a><a href=\"/signup\">Sign up</a></nav>"
            .to_string(),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} - Focus Battle</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header><strong>Focus Battle</strong>{nav}</header>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

fn error_banner(error: Option<&str>) -> String {
    error
        .map(|message| format!("<p class=\"error\" role=\"alert\">{}</p>", escape_html(message)))
        .unwrap_or_default()
}

fn credentials_form(action: &str, submit: &str, username: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label for=\"username\">Username</label>\n\
         <input id=\"username\" name=\"username\" value=\"{username}\" autocomplete=\"username\" required>\n\
         <label for=\"password\">Password</label>\n\
         <input id=\"password\" name=\"password\" type=\"password\" required>\n\
         <button type=\"submit\">{submit}</button>\n</form>",
        username = escape_html(username),
    )
}

pub fn login_page(error: Option<&str>, username: &str) -> String {
    let body = format!(
        "<h1>Log in</h1>\n{}\n{}\n<p>No account yet? <a href=\"/signup\">Sign up</a></p>",
        error_banner(error),
        credentials_form("/login", "Log in", username)
    );
    layout("Log in", None, &body)
}

pub fn signup_page(error: Option<&str>, username: &str) -> String {
    let body = format!(
        "<h1>Sign up</h1>\n{}\n{}\n<p>Already registered? <a href=\"/login\">Log in</a></p>",
        error_banner(error),
        credentials_form("/signup", "Create account", username)
    );
    layout("Sign up", None, &body)
}

pub fn dashboard_page(user: &User) -> String {
    let body = format!(
        "<h1>Welcome, {username}</h1>\n\
         <section class=\"stats\">\n\
         <div><strong id=\"wins\">{wins}</strong>Wins</div>\n\
         <div><strong id=\"losses\">{losses}</strong>Losses</div>\n\
         <div><strong id=\"streak\">{streak}</strong>Streak</div>\n\
         </section>\n\
         <section id=\"focus\" data-minutes=\"{FOCUS_MINUTES}\">\n\
         <div id=\"timer\" class=\"timer\"></div>\n\
         <div class=\"controls\">\n\
         <button id=\"start\" type=\"button\">Start focus</button>\n\
         <button id=\"give-up\" class=\"danger\" type=\"button\" hidden>Give up</button>\n\
         </div>\n<p id=\"message\" role=\"status\"></p>\n</section>\n\
         <p>Leaving the page while the timer runs counts as a loss.</p>\n\
         <script>{TIMER_SCRIPT}</script>",
        username = escape_html(user.username()),
        wins = user.wins(),
        losses = user.losses(),
        streak = user.streak(),
    );
    layout("Dashboard", Some(user.username()), &body)
}

pub fn leaderboard_page(entries: &[UserStats], current_username: Option<&str>) -> String {
    let mut rows = String::new();
    for (rank, entry) in entries.iter().enumerate() {
        let class = if current_username == Some(entry.username.as_str()) {
            " class=\"me\""
        } else {
            ""
        };
        // Writing to a String cannot fail
        let _ = writeln!(
            rows,
            "<tr{class}><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            rank + 1,
            escape_html(&entry.username),
            entry.wins,
            entry.losses,
            entry.streak,
        );
    }

    let table = if entries.is_empty() {
        "<p>No one has battled yet.</p>".to_string()
    } else {
        format!(
            "<table>\n<thead><tr><th>#</th><th>User</th><th>Wins</th><th>Losses</th>\
             <th>Streak</th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>"
        )
    };

    layout(
        "Leaderboard",
        current_username,
        &format!("<h1>Leaderboard</h1>\n{table}"),
    )
}

pub fn error_page() -> String {
    layout(
        "Error",
        None,
        "<h1>Something went wrong</h1>\n<p>Please try again in a moment.</p>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Standing, UserId};

    fn stats(username: &str, wins: u32) -> UserStats {
        UserStats {
            username: username.to_string(),
            wins,
            losses: 0,
            streak: 0,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#x27;y&#x27;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_login_page_shows_error_and_keeps_username() {
        let html = login_page(Some("Invalid username or password."), "alice");

        assert!(html.contains("Invalid username or password."));
        assert!(html.contains("value=\"alice\""));
        assert!(html.contains("action=\"/login\""));
    }

    #[test]
    fn test_signup_page_without_error() {
        let html = signup_page(None, "");

        assert!(!html.contains("class=\"error\""));
        assert!(html.contains("action=\"/signup\""));
    }

    #[test]
    fn test_dashboard_escapes_username() {
        let user = User::with_standing(
            UserId::new(1),
            "<b>bob</b>",
            "hash",
            Standing {
                wins: 3,
                losses: 1,
                streak: 2,
            },
        );

        let html = dashboard_page(&user);

        assert!(html.contains("&lt;b&gt;bob&lt;/b&gt;"));
        assert!(!html.contains("<b>bob</b>"));
        assert!(html.contains("<strong id=\"wins\">3</strong>"));
        assert!(html.contains("<strong id=\"streak\">2</strong>"));
        assert!(html.contains("/api/session/"));
        assert!(html.contains("keepalive"));
    }

    #[test]
    fn test_leaderboard_highlights_current_user() {
        let entries = vec![stats("alice", 9), stats("bob", 5)];

        let html = leaderboard_page(&entries, Some("bob"));

        assert!(html.contains("<tr class=\"me\"><td>2</td><td>bob</td>"));
        assert!(html.contains("<tr><td>1</td><td>alice</td>"));
    }

    #[test]
    fn test_empty_leaderboard() {
        let html = leaderboard_page(&[], Some("alice"));
        assert!(html.contains("No one has battled yet."));
    }
}
