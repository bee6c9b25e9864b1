//! HTML document shells, CDN runtimes and the in-sandbox error banner.

use crate::materialize::scaffold::escape_html;

/// Tailwind play CDN, the utility CSS every preview loads.
pub const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
/// React UMD runtime.
pub const REACT_CDN: &str = "https://unpkg.com/react@18.3.1/umd/react.development.js";
/// ReactDOM UMD runtime.
pub const REACT_DOM_CDN: &str = "https://unpkg.com/react-dom@18.3.1/umd/react-dom.development.js";
/// In-browser transpiler for JSX and TypeScript.
pub const BABEL_CDN: &str = "https://unpkg.com/@babel/standalone@7.25.9/babel.min.js";
/// Vue global build including the runtime template compiler.
pub const VUE_CDN: &str = "https://unpkg.com/vue@3.5.12/dist/vue.global.prod.js";

/// `sandbox` attribute value a host must render previews with: scripts and forms
/// run, same-origin access to the host page is denied.
pub const SANDBOX_ATTRIBUTES: &str = "allow-scripts allow-forms";

/// Defines `window.__loomShowError` and routes uncaught errors to it.
///
/// The banner is drawn inside the preview document; errors never reach the host.
const ERROR_BANNER_SCRIPT: &str = r"<script>
  window.__loomShowError = function (err) {
    var message = err && err.message ? err.message : String(err);
    var banner = document.getElementById('loom-error');
    if (!banner) {
      banner = document.createElement('div');
      banner.id = 'loom-error';
      banner.setAttribute('role', 'alert');
      banner.style.cssText = 'position:fixed;left:0;right:0;top:0;z-index:2147483647;padding:12px 16px;background:#fef2f2;color:#991b1b;border-bottom:1px solid #fecaca;font:13px/1.5 ui-monospace,monospace;white-space:pre-wrap;';
      (document.body || document.documentElement).appendChild(banner);
    }
    banner.textContent = 'Preview error: ' + message;
  };
  window.addEventListener('error', function (event) {
    window.__loomShowError(event.error || event.message);
    event.preventDefault();
  });
  window.addEventListener('unhandledrejection', function (event) {
    window.__loomShowError(event.reason);
    event.preventDefault();
  });
</script>";

const STATIC_BADGE: &str = r#"<div id="loom-static-badge" style="position:fixed;right:12px;bottom:12px;z-index:2147483647;padding:4px 10px;border-radius:9999px;background:#111827;color:#f9fafb;font:600 11px/1.6 system-ui,sans-serif;letter-spacing:.02em;opacity:.85;">Static preview</div>"#;

/// Minimal HTML5 shell with the utility CSS include.
pub fn html_shell(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{title}</title>
  <script src="{TAILWIND_CDN}"></script>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

/// Shell for script-driven previews: error banner first, then the runtimes, then the
/// mount script.
pub fn runtime_shell(title: &str, runtimes: &[&str], body: &str, script: &str) -> String {
    let runtime_tags = runtimes
        .iter()
        .map(|src| format!(r#"  <script crossorigin src="{src}"></script>"#))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{title}</title>
  {ERROR_BANNER_SCRIPT}
  <script src="{TAILWIND_CDN}"></script>
{runtime_tags}
</head>
<body>
{body}
<script>
{script}
</script>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

/// Static rendering tagged with the visible "Static preview" badge.
pub fn static_preview(title: &str, markup: &str) -> String {
    html_shell(title, &format!("{markup}\n{STATIC_BADGE}"))
}

/// Placeholder shown while nothing renderable exists yet.
pub fn loading_placeholder() -> String {
    html_shell(
        "Preview",
        r#"<div class="min-h-screen flex items-center justify-center bg-gray-50">
  <div class="flex flex-col items-center gap-3 text-gray-500">
    <div class="h-8 w-8 animate-spin rounded-full border-4 border-gray-300 border-t-gray-600"></div>
    <p class="text-sm">Loading preview...</p>
  </div>
</div>"#,
    )
}

/// Make sure a full document loads the utility CSS.
///
/// Documents that already reference the CDN are returned unchanged. Otherwise the
/// include goes before `</head>`; headless documents get a head after `<html ...>`, and
/// bare fragments are wrapped in [`html_shell`].
pub fn ensure_tailwind(document: &str) -> String {
    if document.contains(TAILWIND_CDN) {
        return document.to_string();
    }
    let include = format!(r#"<script src="{TAILWIND_CDN}"></script>"#);
    let lower = document.to_ascii_lowercase();
    if let Some(idx) = lower.find("</head>") {
        return format!("{}  {include}\n{}", &document[..idx], &document[idx..]);
    }
    if let Some(start) = lower.find("<html") {
        if let Some(end) = lower[start..].find('>') {
            let split = start + end + 1;
            return format!(
                "{}\n<head>\n  {include}\n</head>{}",
                &document[..split],
                &document[split..]
            );
        }
    }
    html_shell("Preview", document)
}

/// Encode `text` as a JavaScript string literal that is safe inside `<script>`.
///
/// JSON string syntax is valid JavaScript; `</` and `<!--` are escaped so the literal
/// can never close the surrounding script element.
pub fn js_string_literal(text: &str) -> String {
    serde_json::to_string(text)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
        .replace("<!--", "<\\!--")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_html_shell_includes_cdn_and_escaped_title() {
        let doc = html_shell("A <b> page", "<main>x</main>");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(TAILWIND_CDN));
        assert!(doc.contains("<title>A &lt;b&gt; page</title>"));
        assert!(doc.contains("<main>x</main>"));
    }

    #[test]
    fn test_ensure_tailwind_inserts_before_head_close() {
        let doc = "<!DOCTYPE html><html><HEAD><title>t</title></HEAD><body></body></html>";
        let out = ensure_tailwind(doc);
        let cdn_at = out.find(TAILWIND_CDN).unwrap();
        assert!(cdn_at < out.find("</HEAD>").unwrap());
    }

    #[test]
    fn test_ensure_tailwind_is_noop_when_present() {
        let doc = html_shell("x", "");
        assert_eq!(ensure_tailwind(&doc), doc);
    }

    #[test]
    fn test_ensure_tailwind_headless_and_fragment() {
        let headless = ensure_tailwind("<html lang=\"en\"><body>x</body></html>");
        assert!(headless.starts_with("<html lang=\"en\">\n<head>"));
        assert!(headless.contains(TAILWIND_CDN));

        let fragment = ensure_tailwind("<p>x</p>");
        assert!(fragment.starts_with("<!DOCTYPE html>"));
        assert!(fragment.contains("<p>x</p>"));
    }

    #[test]
    fn test_js_string_literal_cannot_close_script() {
        let literal = js_string_literal("a</script><!-- \"q\"\n");
        assert!(!literal.contains("</script"));
        assert!(!literal.contains("<!--"));
        assert!(literal.starts_with('"') && literal.ends_with('"'));
        assert!(literal.contains("\\n"));
    }

    #[test]
    fn test_runtime_shell_orders_banner_before_runtimes() {
        let doc = runtime_shell("t", &[REACT_CDN], "<div id=\"root\"></div>", "run();");
        let banner = doc.find("__loomShowError").unwrap();
        let runtime = doc.find(REACT_CDN).unwrap();
        assert!(banner < runtime);
        assert!(doc.contains("run();"));
    }

    #[test]
    fn test_static_preview_has_badge() {
        let doc = static_preview("t", "<h1>Hi</h1>");
        assert!(doc.contains("Static preview"));
        assert!(doc.contains("<h1>Hi</h1>"));
    }
}
