//! Progressive-enhancement script embedded in every page.
//!
//! Every form works without it. With it, the browser applies the same rules
//! as `contacts_core::interaction`:
//! - a search writes history when it is issued (push for the first search
//!   from a page without `q`, replace after that), marks the field busy, and
//!   renders only the latest response;
//! - back/forward reloads the sidebar and the routed content for the new
//!   location;
//! - the favorite button shows its latest submitted value until that
//!   submission is answered; older answers never clear it;
//! - delete forms ask for confirmation and do nothing when declined.
//!
//! Labels, glyphs, field names and the confirm message come from the
//! `page-config` JSON rendered by [`page_config_json`], never from the script.

use contacts_core::interaction::favorite::FAVORITE_FIELD;
use contacts_core::interaction::routes::{INDEX_PATH, SEARCH_PARAM};
use contacts_core::{FavoriteView, DELETE_CONFIRM_MESSAGE};
use log::error;
use serde::Serialize;

pub(crate) const PAGE_CONFIG_ID: &str = "page-config";

#[derive(Debug, Serialize)]
struct FavoriteViews {
    on: FavoriteView,
    off: FavoriteView,
}

#[derive(Debug, Serialize)]
struct PageConfig {
    index_path: &'static str,
    search_param: &'static str,
    favorite_field: &'static str,
    favorite: FavoriteViews,
    confirm_message: &'static str,
}

impl PageConfig {
    fn current() -> Self {
        Self {
            index_path: INDEX_PATH,
            search_param: SEARCH_PARAM,
            favorite_field: FAVORITE_FIELD,
            favorite: FavoriteViews {
                on: FavoriteView::for_value(true),
                off: FavoriteView::for_value(false),
            },
            confirm_message: DELETE_CONFIRM_MESSAGE,
        }
    }
}

/// JSON read by [`PAGE_SCRIPT`], safe to embed inside a `<script>` element.
pub(crate) fn page_config_json() -> String {
    match serde_json::to_string(&PageConfig::current()) {
        Ok(json) => json.replace("</", "<\\/"),
        Err(err) => {
            error!("event=page_config module=web status=error error={err}");
            "{}".to_string()
        }
    }
}

pub(crate) const PAGE_SCRIPT: &str = r#"
(function () {
  var config = JSON.parse(document.getElementById("page-config").textContent);
  var form = document.getElementById("search-form");
  var input = document.getElementById(config.search_param);
  var spinner = document.getElementById("search-spinner");
  var latest = 0;

  function setSearching(on) {
    if (input) {
      input.classList.toggle("loading", on);
      if (on) { input.setAttribute("aria-busy", "true"); }
      else { input.removeAttribute("aria-busy"); }
    }
    if (spinner) { spinner.hidden = !on; }
  }

  function queryOf(url) {
    return new URL(url, location.href).searchParams.get(config.search_param);
  }

  function swap(doc, id) {
    var current = document.getElementById(id);
    var next = doc.getElementById(id);
    if (current && next) { current.innerHTML = next.innerHTML; }
  }

  function navigate(url, replace) {
    var seq = ++latest;
    if (replace === true) { history.replaceState(null, "", url); }
    else if (replace === false) { history.pushState(null, "", url); }
    setSearching(queryOf(url) !== null);

    return fetch(url, { headers: { "Accept": "text/html" } })
      .then(function (res) {
        if (seq !== latest) { return null; }
        if (!res.ok) { location.assign(url); return null; }
        return res.text();
      })
      .then(function (html) {
        if (html === null || seq !== latest) { return; }
        var doc = new DOMParser().parseFromString(html, "text/html");
        swap(doc, "contact-list");
        swap(doc, "detail");
        document.title = doc.title;
        var next = doc.getElementById("search-form");
        if (form && next) { form.dataset.replace = next.dataset.replace; }
        if (input) { input.value = queryOf(url) || ""; }
        bind(document.getElementById("detail"));
      })
      .catch(function (err) {
        if (seq === latest) { alert("Could not load contacts: " + err.message); }
      })
      .finally(function () {
        if (seq === latest) { setSearching(false); }
      });
  }

  function search() {
    var replace = form.dataset.replace === "true";
    form.dataset.replace = "true";
    var params = new URLSearchParams();
    params.set(config.search_param, input.value);
    navigate(config.index_path + "?" + params.toString(), replace);
  }

  if (form && input) {
    input.addEventListener("input", search);
    form.addEventListener("submit", function (event) {
      event.preventDefault();
      search();
    });
    window.addEventListener("popstate", function () {
      navigate(location.pathname + location.search, null);
    });
  }

  function bindFavorite(fav) {
    var button = fav.querySelector("button[name=" + config.favorite_field + "]");
    if (!button) { return; }
    var confirmed = button.value === config.favorite.on.submit_value;
    var confirmedSeq = 0;
    var lastSeq = 0;
    var pending = null;

    function displayed() { return pending ? pending.favorite : confirmed; }

    function draw() {
      var view = displayed() ? config.favorite.on : config.favorite.off;
      button.textContent = view.glyph;
      button.value = view.submit_value;
      button.setAttribute("aria-label", view.label);
    }

    function settle(seq) {
      if (pending && pending.seq === seq) { pending = null; return true; }
      return false;
    }

    fav.addEventListener("submit", function (event) {
      event.preventDefault();
      var submission = { seq: ++lastSeq, favorite: !displayed() };
      pending = submission;
      draw();

      var body = new URLSearchParams();
      body.set(config.favorite_field, String(submission.favorite));
      fetch(fav.action, {
        method: "POST",
        headers: {
          "Accept": "application/json",
          "Content-Type": "application/x-www-form-urlencoded"
        },
        body: body.toString()
      })
        .then(function (res) {
          if (!res.ok) { throw new Error("HTTP " + res.status); }
          return res.json();
        })
        .then(function (contact) {
          if (submission.seq < confirmedSeq) { return; }
          confirmed = contact.favorite;
          confirmedSeq = submission.seq;
          settle(submission.seq);
          draw();
        })
        .catch(function (err) {
          if (settle(submission.seq)) {
            draw();
            alert("Could not update favorite: " + err.message);
          }
        });
    });
  }

  function bind(root) {
    if (!root) { return; }
    root.querySelectorAll("form[data-favorite-form]").forEach(bindFavorite);
    root.querySelectorAll("form[data-confirm]").forEach(function (destroy) {
      destroy.addEventListener("submit", function (event) {
        if (!confirm(destroy.dataset.confirm || config.confirm_message)) {
          event.preventDefault();
        }
      });
    });
    root.querySelectorAll("button[data-cancel]").forEach(function (cancel) {
      cancel.addEventListener("click", function () { history.back(); });
    });
  }

  bind(document);
})();
"#;
