use crate::models::{ExerciseType, Intensity};
use crate::progress::{Summary, TimeRange};
use chrono::NaiveDate;

pub fn render_index(today: NaiveDate, summary: &Summary) -> String {
    INDEX_HTML
        .replace("{{TODAY}}", &today.format("%Y-%m-%d").to_string())
        .replace("{{TYPE_OPTIONS}}", &options(ExerciseType::ALL.map(ExerciseType::as_str)))
        .replace("{{INTENSITY_OPTIONS}}", &options(Intensity::ALL.map(Intensity::as_str)))
        .replace("{{RANGE_OPTIONS}}", &range_options())
        .replace("{{COUNT}}", &summary.count.to_string())
        .replace("{{TOTAL}}", &summary.total_minutes.to_string())
        .replace("{{AVERAGE}}", &summary.average_minutes.to_string())
}

fn options<const N: usize>(values: [&str; N]) -> String {
    values
        .iter()
        .map(|value| format!(r#"<option value="{value}">{value}</option>"#))
        .collect::<Vec<_>>()
        .join("")
}

fn range_options() -> String {
    TimeRange::ALL
        .iter()
        .map(|range| format!(r#"<option value="{range}">{}</option>"#, range.label()))
        .collect::<Vec<_>>()
        .join("")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Exercise Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef4ee;
      --bg-2: #b9dcc4;
      --ink: #22302a;
      --muted: #6a7a72;
      --accent: #2f8f5b;
      --accent-2: #2f4858;
      --danger: #c2413a;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e3f1e7 60%, #f4f8f3 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(900px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
      text-align: center;
    }

    h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .tabs {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
    }

    .tab {
      background: transparent;
      border: none;
      border-radius: 999px;
      padding: 10px 14px;
      font: inherit;
      font-weight: 600;
      color: var(--muted);
      cursor: pointer;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .panel {
      display: none;
      gap: 18px;
    }

    .panel.active {
      display: grid;
    }

    .fields {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 14px;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.9rem;
      font-weight: 500;
    }

    input,
    select {
      font: inherit;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.18);
      background: white;
    }

    button.primary,
    button.danger,
    button.ghost {
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
    }

    button.primary {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 143, 91, 0.3);
    }

    button.danger {
      background: var(--danger);
      color: white;
    }

    button.ghost {
      background: transparent;
      color: var(--muted);
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th,
    td {
      text-align: left;
      padding: 10px 8px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    th:last-child,
    td:last-child {
      text-align: right;
    }

    .badge {
      display: inline-block;
      padding: 2px 10px;
      border-radius: 999px;
      font-size: 0.8rem;
      font-weight: 600;
    }

    .badge.low { background: #dcfce7; color: #166534; }
    .badge.medium { background: #fef9c3; color: #854d0e; }
    .badge.high { background: #fee2e2; color: #991b1b; }

    .empty {
      text-align: center;
      padding: 40px 0;
      color: var(--muted);
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 14px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    .chart {
      height: 300px;
      display: flex;
      align-items: flex-end;
      gap: 8px;
      padding: 16px;
      background: white;
      border-radius: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .bar {
      flex: 1;
      height: 100%;
      display: flex;
      flex-direction: column;
      justify-content: flex-end;
      align-items: stretch;
      gap: 6px;
    }

    .bar .fill {
      background: var(--accent);
      border-radius: 8px;
      min-height: 4px;
    }

    .bar .day {
      font-size: 0.75rem;
      text-align: center;
      color: var(--muted);
    }

    .progress-header {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }

    dialog {
      border: none;
      border-radius: 20px;
      padding: 24px;
      box-shadow: var(--shadow);
      max-width: 420px;
    }

    dialog .actions {
      display: flex;
      justify-content: flex-end;
      gap: 10px;
    }

    .status {
      min-height: 1.2em;
      text-align: center;
      font-weight: 500;
    }

    .status[data-type="error"] { color: var(--danger); }
    .status[data-type="ok"] { color: var(--accent); }
  </style>
</head>
<body>
  <main class="app">
    <h1>Exercise Tracker</h1>

    <nav class="tabs" role="tablist">
      <button class="tab active" data-tab="add" role="tab">Add Exercise</button>
      <button class="tab" data-tab="history" role="tab">History</button>
      <button class="tab" data-tab="progress" role="tab">Progress</button>
    </nav>

    <section class="panel active" id="panel-add">
      <div>
        <h2>Add New Exercise</h2>
        <p class="subtitle">Record your workout details to track your fitness journey</p>
      </div>
      <form id="add-form" novalidate>
        <div class="fields">
          <label>Exercise Name *
            <input name="name" placeholder="e.g., Running, Push-ups" />
          </label>
          <label>Exercise Type *
            <select name="type">
              <option value="">Select type</option>
              {{TYPE_OPTIONS}}
            </select>
          </label>
          <label>Duration (minutes) *
            <input name="duration" type="number" min="1" placeholder="30" />
          </label>
          <label>Intensity
            <select name="intensity">
              <option value="">Select intensity</option>
              {{INTENSITY_OPTIONS}}
            </select>
          </label>
          <label>Date
            <input name="date" type="date" value="{{TODAY}}" />
          </label>
          <label>Notes
            <input name="notes" placeholder="Any additional details about your workout" />
          </label>
        </div>
        <p><button class="primary" type="submit">Add Exercise</button></p>
      </form>
    </section>

    <section class="panel" id="panel-history">
      <div>
        <h2>Exercise History</h2>
        <p class="subtitle">View and manage your past workouts</p>
      </div>
      <div id="history"></div>
    </section>

    <section class="panel" id="panel-progress">
      <div class="progress-header">
        <div>
          <h2>Your Progress</h2>
          <p class="subtitle">Track your exercise activity over time</p>
        </div>
        <select id="range">
          {{RANGE_OPTIONS}}
        </select>
      </div>
      <div class="stats">
        <div class="stat"><div class="value" id="stat-count">{{COUNT}}</div><div class="label">Total Workouts</div></div>
        <div class="stat"><div class="value" id="stat-total">{{TOTAL}} min</div><div class="label">Total Duration</div></div>
        <div class="stat"><div class="value" id="stat-average">{{AVERAGE}} min</div><div class="label">Avg. Duration</div></div>
      </div>
      <div id="chart"></div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <dialog id="confirm">
    <h2>Are you sure?</h2>
    <p class="subtitle">This action cannot be undone. This will permanently delete the exercise from your history.</p>
    <div class="actions">
      <button class="ghost" id="confirm-cancel">Cancel</button>
      <button class="danger" id="confirm-delete">Delete</button>
    </div>
  </dialog>

  <script>
    const statusEl = document.getElementById('status');
    const form = document.getElementById('add-form');
    const historyEl = document.getElementById('history');
    const chartEl = document.getElementById('chart');
    const rangeEl = document.getElementById('range');
    const confirmEl = document.getElementById('confirm');
    const tabs = Array.from(document.querySelectorAll('.tab'));

    let pendingDelete = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
      if (type === 'ok') {
        setTimeout(() => setStatus('', ''), 1600);
      }
    };

    const escapeHtml = (text) =>
      String(text).replace(/[&<>"']/g, (c) => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' })[c]);

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const loadHistory = async () => {
      const rows = await request('/api/history');
      if (!rows.length) {
        historyEl.innerHTML = '<div class="empty">No exercises recorded yet. Start by adding your first workout!</div>';
        return;
      }
      const body = rows
        .map((row) => `
          <tr>
            <td><strong>${escapeHtml(row.name)}</strong></td>
            <td>${row.type}</td>
            <td>${row.duration_label}</td>
            <td><span class="badge ${row.intensity_tone}">${row.intensity}</span></td>
            <td>${row.date_label}</td>
            <td><button class="ghost" data-delete="${escapeHtml(row.id)}" title="Delete">&#128465;</button></td>
          </tr>`)
        .join('');
      historyEl.innerHTML = `
        <table>
          <thead><tr><th>Exercise</th><th>Type</th><th>Duration</th><th>Intensity</th><th>Date</th><th>Actions</th></tr></thead>
          <tbody>${body}</tbody>
        </table>`;
    };

    const loadProgress = async () => {
      const report = await request(`/api/progress?range=${rangeEl.value}`);
      document.getElementById('stat-count').textContent = report.summary.count;
      document.getElementById('stat-total').textContent = `${report.summary.total_minutes} min`;
      document.getElementById('stat-average').textContent = `${report.summary.average_minutes} min`;

      if (!report.series.length) {
        chartEl.className = '';
        chartEl.innerHTML = '<div class="empty">No exercise data available for the selected time period</div>';
        return;
      }
      chartEl.className = 'chart';
      chartEl.innerHTML = report.series
        .map((bucket) => `
          <div class="bar" title="${bucket.minutes} min">
            <div class="fill" style="height: ${bucket.height}%"></div>
            <span class="day">${bucket.label}</span>
          </div>`)
        .join('');
    };

    const refresh = () =>
      Promise.all([loadHistory(), loadProgress()]).catch((err) => setStatus(err.message, 'error'));

    const pickedDate = (value) => {
      if (!value) {
        return new Date().toISOString();
      }
      const now = new Date();
      const date = new Date(`${value}T00:00:00`);
      date.setHours(now.getHours(), now.getMinutes(), now.getSeconds(), now.getMilliseconds());
      return date.toISOString();
    };

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const fields = Object.fromEntries(new FormData(form).entries());
      if (!fields.name || !fields.type || !fields.duration) {
        setStatus('Missing fields: please fill in all required fields', 'error');
        return;
      }
      try {
        await request('/api/exercises', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ ...fields, date: pickedDate(fields.date) })
        });
        const keepDate = form.elements.date.value;
        form.reset();
        form.elements.date.value = keepDate;
        setStatus('Exercise added', 'ok');
        refresh();
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    historyEl.addEventListener('click', (event) => {
      const button = event.target.closest('[data-delete]');
      if (!button) {
        return;
      }
      pendingDelete = button.dataset.delete;
      confirmEl.showModal();
    });

    document.getElementById('confirm-cancel').addEventListener('click', () => {
      pendingDelete = null;
      confirmEl.close();
    });

    document.getElementById('confirm-delete').addEventListener('click', async () => {
      const id = pendingDelete;
      pendingDelete = null;
      confirmEl.close();
      if (!id) {
        return;
      }
      try {
        await request(`/api/exercises/${encodeURIComponent(id)}`, { method: 'DELETE' });
        setStatus('Exercise deleted', 'ok');
        refresh();
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    rangeEl.addEventListener('change', () => {
      loadProgress().catch((err) => setStatus(err.message, 'error'));
    });

    tabs.forEach((button) => {
      button.addEventListener('click', () => {
        tabs.forEach((tab) => tab.classList.toggle('active', tab === button));
        document.querySelectorAll('.panel').forEach((panel) => {
          panel.classList.toggle('active', panel.id === `panel-${button.dataset.tab}`);
        });
      });
    });

    refresh();
  </script>
</body>
</html>
"#;
