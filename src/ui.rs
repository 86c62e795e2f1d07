use crate::models::Shift;

pub fn render_index() -> String {
    let shift_options: String = Shift::ALL
        .iter()
        .map(|shift| format!(r#"<option value="{}">{}</option>"#, shift.as_str(), shift.display_name()))
        .collect();
    INDEX_HTML.replace("{{SHIFT_OPTIONS}}", &shift_options)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Shift Indicators Dashboard</title>
  <style>
    :root {
      --bg: #f4f6fb;
      --ink: #1f2933;
      --muted: #6b7280;
      --card: #ffffff;
      --accent: #2563eb;
      --danger: #dc2626;
      --shadow: 0 12px 30px rgba(31, 41, 51, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 24px;
    }

    .app {
      max-width: 1100px;
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    .card {
      background: var(--card);
      border-radius: 16px;
      box-shadow: var(--shadow);
      padding: 20px;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
    }

    .kpi .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .kpi .value {
      font-size: 1.8rem;
      font-weight: 600;
    }

    .bar-row {
      display: grid;
      grid-template-columns: 140px 1fr 60px;
      gap: 8px;
      align-items: center;
      font-size: 0.85rem;
      margin-bottom: 6px;
    }

    .bar {
      height: 12px;
      border-radius: 6px;
      background: var(--accent);
    }

    .bar.alt {
      background: #16a34a;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.9rem;
    }

    th, td {
      text-align: left;
      padding: 6px 8px;
      border-bottom: 1px solid #e5e7eb;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    dl {
      display: grid;
      grid-template-columns: max-content 1fr;
      gap: 4px 16px;
    }

    dt {
      font-weight: 600;
    }

    .tags li {
      font-size: 0.85rem;
    }

    .status[data-type="error"] {
      color: var(--danger);
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Shift Indicators Dashboard</h1>
      <p>Attendance, waits and outcomes per shift.</p>
    </header>

    <section class="card grid">
      <label>Date
        <select id="filter-date"><option value="all">All dates</option></select>
      </label>
      <label>Shift
        <select id="filter-shift"><option value="all">All shifts</option>{{SHIFT_OPTIONS}}</select>
      </label>
    </section>

    <section class="grid">
      <div class="card kpi"><div class="label">Total attendance</div><div class="value" id="kpi-attendance">0</div></div>
      <div class="card kpi"><div class="label">Average wait</div><div class="value" id="kpi-wait">0 min</div></div>
      <div class="card kpi"><div class="label">Total admissions</div><div class="value" id="kpi-admissions">0</div></div>
      <div class="card kpi"><div class="label">Total deaths</div><div class="value" id="kpi-deaths">0</div></div>
    </section>

    <section class="grid">
      <div class="card"><h2>Triage</h2><div id="chart-triage"></div></div>
      <div class="card"><h2>Attendance vs wait</h2><div id="chart-attendance"></div></div>
      <div class="card"><h2>Critical outcomes</h2><div id="chart-outcomes"></div></div>
      <div class="card"><h2>Resources</h2><div id="chart-resources"></div></div>
    </section>

    <section class="card">
      <h2 id="form-title">New report</h2>
      <form id="report-form" class="grid">
        <input type="hidden" id="id" />
        <label>Date <input type="date" id="date" required /></label>
        <label>Shift <select id="shift" required>{{SHIFT_OPTIONS}}</select></label>
        <label>Attendance <input type="number" id="attendance" min="0" value="0" required /></label>
        <label>Blue <input type="number" id="blue" min="0" value="0" /></label>
        <label>Green <input type="number" id="green" min="0" value="0" /></label>
        <label>Yellow <input type="number" id="yellow" min="0" value="0" /></label>
        <label>Red <input type="number" id="red" min="0" value="0" /></label>
        <label>Average wait (min) <input type="number" id="wait_minutes" min="0" step="0.1" value="0" /></label>
        <label>Admissions <input type="number" id="admissions" min="0" value="0" /></label>
        <label>Length of stay (days) <input type="number" id="length_of_stay_days" min="0" step="0.1" value="0" /></label>
        <label>Adverse events <input type="number" id="adverse_events" min="0" value="0" /></label>
        <div data-kind="evaluations" class="tags">
          <label>Evaluation <input class="tag-label" /><input class="tag-qty" type="number" min="1" value="1" /></label>
          <button type="button" class="tag-add">Add evaluation</button><ul></ul>
        </div>
        <div data-kind="exams" class="tags">
          <label>Exam <input class="tag-label" /><input class="tag-qty" type="number" min="1" value="1" /></label>
          <button type="button" class="tag-add">Add exam</button><ul></ul>
        </div>
        <div data-kind="death_causes" class="tags">
          <label>Cause of death <input class="tag-label" /><input class="tag-qty" type="number" min="1" value="1" /></label>
          <button type="button" class="tag-add">Add cause</button><ul></ul>
        </div>
        <div>
          <button type="submit">Save report</button>
          <button type="button" id="clear-form">Clear</button>
        </div>
      </form>
      <div class="status" id="status"></div>
    </section>

    <section class="card">
      <h2>Reports</h2>
      <div class="grid">
        <label>Date <input type="date" id="table-date" /></label>
        <label>Shift
          <select id="table-shift"><option value="all">All shifts</option>{{SHIFT_OPTIONS}}</select>
        </label>
        <button type="button" id="table-clear" hidden>Clear filters</button>
      </div>
      <table>
        <thead><tr><th>Date</th><th>Shift</th><th>Attendance</th><th>Wait</th><th>Admissions</th><th>Deaths</th><th></th></tr></thead>
        <tbody id="records"></tbody>
      </table>
    </section>

    <dialog id="detail">
      <h2>Report details</h2>
      <dl id="detail-fields"></dl>
      <button type="button" id="detail-close">Close</button>
    </dialog>
  </main>

  <script>
    const INTEGER_FIELDS = ['attendance', 'blue', 'green', 'yellow', 'red', 'admissions', 'adverse_events'];
    const DECIMAL_FIELDS = ['wait_minutes', 'length_of_stay_days'];
    const statusEl = document.getElementById('status');
    const filterDate = document.getElementById('filter-date');
    const filterShift = document.getElementById('filter-shift');
    const form = document.getElementById('report-form');

    let records = [];
    let tags = { evaluations: [], exams: [], death_causes: [] };

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const el = (tag, text, attrs = {}) => {
      const node = document.createElement(tag);
      if (text !== undefined) {
        node.textContent = String(text);
      }
      Object.entries(attrs).forEach(([name, value]) => node.setAttribute(name, value));
      return node;
    };

    const labelNode = (label) => {
      const span = el('span');
      (Array.isArray(label) ? label : [label]).forEach((line, index) => {
        if (index > 0) {
          span.append(el('br'));
        }
        span.append(document.createTextNode(line));
      });
      return span;
    };

    const renderBars = (target, chart) => {
      const max = Math.max(1, ...chart.datasets.flatMap((set) => set.data));
      const rows = chart.labels.flatMap((label, index) => chart.datasets.map((set, setIndex) => {
        const row = el('div', undefined, { class: 'bar-row' });
        const name = setIndex === 0 ? labelNode(label) : el('span');
        name.append(' ', el('small', set.label));
        const bar = el('div', undefined, { class: setIndex > 0 ? 'bar alt' : 'bar' });
        bar.style.width = `${(set.data[index] / max) * 100}%`;
        row.append(name, bar, el('span', set.data[index]));
        return row;
      }));
      target.replaceChildren(...(rows.length ? rows : [el('p', 'No data')]));
    };

    const deaths = (record) => record.death_causes.reduce((sum, entry) => sum + entry.quantity, 0);

    const tableDate = document.getElementById('table-date');
    const tableShift = document.getElementById('table-shift');
    const tableClear = document.getElementById('table-clear');

    const renderRecords = (rows) => {
      const body = document.getElementById('records');
      if (!rows.length) {
        const row = el('tr');
        row.append(el('td', 'No reports match the selected filters.', { colspan: '7' }));
        body.replaceChildren(row);
        return;
      }
      body.replaceChildren(...rows.map((record) => {
        const row = el('tr');
        [record.date, record.shift, record.attendance, record.wait_minutes, record.admissions, deaths(record)]
          .forEach((value) => row.append(el('td', value)));
        const actions = el('td');
        actions.append(
          el('button', 'View', { 'data-view': record.id }), ' ',
          el('button', 'Edit', { 'data-edit': record.id }), ' ',
          el('button', 'Delete', { 'data-delete': record.id }),
        );
        row.append(actions);
        return row;
      }));
    };

    const loadTable = async () => {
      const query = new URLSearchParams({ date: tableDate.value || 'all', shift: tableShift.value });
      const res = await fetch(`/api/data?${query}`);
      if (!res.ok) {
        throw new Error('Unable to load reports');
      }
      tableClear.hidden = !tableDate.value && tableShift.value === 'all';
      renderRecords(await res.json());
    };

    const showDetail = (record) => {
      const fields = [
        ['ID', record.id], ['Date', record.date], ['Shift', record.shift],
        ['Attendance', record.attendance], ['Blue', record.blue], ['Green', record.green],
        ['Yellow', record.yellow], ['Red', record.red], ['Average wait (min)', record.wait_minutes],
        ['Admissions', record.admissions], ['Length of stay (days)', record.length_of_stay_days],
        ['Adverse events', record.adverse_events],
        ['Evaluations', record.evaluations], ['Exams', record.exams], ['Causes of death', record.death_causes],
      ];
      const list = document.getElementById('detail-fields');
      list.replaceChildren(...fields.flatMap(([name, value]) => [
        el('dt', name),
        el('dd', Array.isArray(value)
          ? (value.map((entry) => `${entry.label}: ${entry.quantity}`).join(', ') || 'N/A')
          : value),
      ]));
      document.getElementById('detail').showModal();
    };

    const loadDashboard = async () => {
      const query = new URLSearchParams({ date: filterDate.value, shift: filterShift.value });
      const res = await fetch(`/api/dashboard?${query}`);
      if (!res.ok) {
        throw new Error('Unable to load dashboard');
      }
      const view = await res.json();
      document.getElementById('kpi-attendance').textContent = view.kpis.total_attendance;
      document.getElementById('kpi-wait').textContent = `${view.kpis.average_wait_minutes} min`;
      document.getElementById('kpi-admissions').textContent = view.kpis.total_admissions;
      document.getElementById('kpi-deaths').textContent = view.kpis.total_deaths;
      renderBars(document.getElementById('chart-triage'), view.triage);
      renderBars(document.getElementById('chart-attendance'), view.attendance_vs_wait);
      renderBars(document.getElementById('chart-outcomes'), view.outcomes);
      renderBars(document.getElementById('chart-resources'), view.resources);

      const selected = filterDate.value;
      filterDate.replaceChildren(
        el('option', 'All dates', { value: 'all' }),
        ...view.available_dates.map((date) => el('option', date, { value: date })),
      );
      filterDate.value = view.available_dates.includes(selected) ? selected : 'all';
    };

    const loadRecords = async () => {
      const res = await fetch('/api/data');
      if (!res.ok) {
        throw new Error('Unable to load reports');
      }
      records = await res.json();
    };

    const refresh = () => Promise.all([loadRecords(), loadTable(), loadDashboard()]);

    const renderTags = () => {
      document.querySelectorAll('.tags').forEach((box) => {
        const kind = box.dataset.kind;
        box.querySelector('ul').replaceChildren(...tags[kind].map((entry) => {
          const item = el('li', `${entry.label}: ${entry.quantity} `);
          item.append(el('button', 'x', { type: 'button', 'data-remove': entry.id }));
          return item;
        }));
      });
    };

    const resetForm = () => {
      form.reset();
      document.getElementById('id').value = '';
      document.getElementById('form-title').textContent = 'New report';
      tags = { evaluations: [], exams: [], death_causes: [] };
      renderTags();
    };

    const readForm = () => {
      const record = {
        id: document.getElementById('id').value || undefined,
        date: document.getElementById('date').value,
        shift: document.getElementById('shift').value,
      };
      INTEGER_FIELDS.forEach((field) => { record[field] = parseInt(document.getElementById(field).value, 10) || 0; });
      DECIMAL_FIELDS.forEach((field) => { record[field] = parseFloat(document.getElementById(field).value) || 0; });
      return { ...record, ...tags };
    };

    const fillForm = (record) => {
      document.getElementById('id').value = record.id;
      document.getElementById('date').value = record.date;
      document.getElementById('shift').value = record.shift;
      [...INTEGER_FIELDS, ...DECIMAL_FIELDS].forEach((field) => { document.getElementById(field).value = record[field]; });
      tags = {
        evaluations: [...record.evaluations],
        exams: [...record.exams],
        death_causes: [...record.death_causes],
      };
      document.getElementById('form-title').textContent = 'Edit report';
      renderTags();
    };

    const send = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body),
      });
      if (!res.ok) {
        const payload = await res.json().catch(() => ({}));
        throw new Error(payload.error || 'Request failed');
      }
      return res.json();
    };

    document.querySelectorAll('.tags').forEach((box) => {
      box.addEventListener('click', (event) => {
        const kind = box.dataset.kind;
        if (event.target.classList.contains('tag-add')) {
          const label = box.querySelector('.tag-label').value.trim();
          const quantity = parseInt(box.querySelector('.tag-qty').value, 10) || 0;
          if (!label || quantity <= 0) {
            setStatus('Enter a label and a quantity greater than zero.', 'error');
            return;
          }
          tags[kind].push({ id: crypto.randomUUID(), label, quantity });
          box.querySelector('.tag-label').value = '';
          box.querySelector('.tag-qty').value = 1;
          renderTags();
        } else if (event.target.dataset.remove) {
          tags[kind] = tags[kind].filter((entry) => entry.id !== event.target.dataset.remove);
          renderTags();
        }
      });
    });

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      const record = readForm();
      const duplicate = records.some((existing) =>
        existing.date === record.date && existing.shift === record.shift && existing.id !== record.id);
      if (duplicate) {
        setStatus('A report already exists for this date and shift.', 'error');
        return;
      }
      send(record.id ? 'PUT' : 'POST', '/api/data', record)
        .then(() => {
          setStatus(record.id ? 'Report updated' : 'Report added', 'ok');
          resetForm();
          return refresh();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('clear-form').addEventListener('click', resetForm);

    document.getElementById('records').addEventListener('click', (event) => {
      const { view, edit, delete: remove } = event.target.dataset;
      if (view) {
        const record = records.find((item) => item.id === view);
        if (record) {
          showDetail(record);
        }
      } else if (edit) {
        const record = records.find((item) => item.id === edit);
        if (record) {
          fillForm(record);
        }
      } else if (remove && window.confirm('Delete this report?')) {
        send('DELETE', `/api/data?id=${encodeURIComponent(remove)}`)
          .then(() => {
            setStatus('Report deleted', 'ok');
            return refresh();
          })
          .catch((err) => setStatus(err.message, 'error'));
      }
    });

    document.getElementById('detail-close').addEventListener('click', () => document.getElementById('detail').close());

    const reloadTable = () => loadTable().catch((err) => setStatus(err.message, 'error'));
    tableDate.addEventListener('change', reloadTable);
    tableShift.addEventListener('change', reloadTable);
    tableClear.addEventListener('click', () => {
      tableDate.value = '';
      tableShift.value = 'all';
      reloadTable();
    });

    filterDate.addEventListener('change', () => loadDashboard().catch((err) => setStatus(err.message, 'error')));
    filterShift.addEventListener('change', () => loadDashboard().catch((err) => setStatus(err.message, 'error')));

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
