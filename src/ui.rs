use crate::clock::Today;

pub fn render_index(today: &Today) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &today.date.format("%A, %e %B %Y").to_string())
        .replace("{{MONTH}}", &today.month_label())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Serious Study Series</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600;700&display=swap');

    :root {
      --bg-1: #020617;
      --bg-2: #0f172a;
      --panel: rgba(15, 23, 42, 0.72);
      --line: #1e293b;
      --ink: #e2e8f0;
      --muted: #94a3b8;
      --accent: #38bdf8;
      --accent-deep: #0369a1;
      --good: #22c55e;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, #1e3a5f33, transparent 55%),
        linear-gradient(150deg, var(--bg-1), var(--bg-2) 55%, var(--bg-1));
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    nav {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 18px 32px;
      background: rgba(2, 6, 23, 0.82);
      backdrop-filter: blur(10px);
      border-bottom: 1px solid var(--line);
    }

    nav h1 {
      margin: 0;
      font-size: 1.2rem;
      font-weight: 700;
      color: var(--accent);
      letter-spacing: 0.04em;
    }

    nav button {
      margin-left: 12px;
      padding: 8px 22px;
      border: none;
      border-radius: 8px;
      background: #334155;
      color: var(--ink);
      font-size: 0.85rem;
      cursor: pointer;
    }

    main {
      max-width: 980px;
      margin: 0 auto;
      padding: 40px 20px 60px;
      display: grid;
      gap: 28px;
    }

    .masthead {
      text-align: center;
    }

    .masthead h2 {
      margin: 0;
      font-size: clamp(2rem, 5vw, 3rem);
      font-weight: 700;
      letter-spacing: 0.18em;
      background: linear-gradient(90deg, var(--accent), #2563eb);
      -webkit-background-clip: text;
      background-clip: text;
      color: transparent;
    }

    .masthead .today {
      margin: 8px 0 0;
      color: var(--muted);
      font-size: 0.85rem;
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
      gap: 20px;
    }

    .card {
      background: var(--panel);
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 22px;
    }

    .card .label {
      margin: 0;
      color: var(--muted);
      font-size: 0.85rem;
    }

    .bar {
      margin-top: 14px;
      height: 10px;
      background: #1e293b;
      border-radius: 999px;
      overflow: hidden;
    }

    .bar .fill {
      height: 100%;
      width: 0;
      background: var(--accent);
      border-radius: 999px;
      transition: width 300ms ease;
    }

    .card .value {
      margin: 10px 0 0;
      font-size: 1.6rem;
      font-weight: 700;
    }

    .pomodoro .clock {
      text-align: center;
      font-size: 3rem;
      font-weight: 700;
      margin: 14px 0;
      font-variant-numeric: tabular-nums;
    }

    .pomodoro .presets,
    .pomodoro .controls {
      display: flex;
      justify-content: center;
      gap: 10px;
      margin-bottom: 12px;
      flex-wrap: wrap;
    }

    .pomodoro button {
      padding: 9px 18px;
      border: none;
      border-radius: 8px;
      background: #1e293b;
      color: var(--ink);
      cursor: pointer;
      font-size: 0.9rem;
    }

    .pomodoro button.primary {
      background: var(--accent-deep);
    }

    .planner h3 {
      margin: 0 0 20px;
      color: var(--accent);
      font-size: 1.15rem;
    }

    .row {
      display: flex;
      align-items: center;
      gap: 14px;
      padding: 12px 0;
      border-bottom: 1px solid var(--line);
    }

    .row .daynum {
      width: 64px;
      font-weight: 700;
      color: var(--muted);
      flex-shrink: 0;
    }

    .row.today .daynum {
      color: var(--accent);
    }

    .row input {
      flex: 1;
      padding: 9px 12px;
      border-radius: 8px;
      border: 1px solid var(--line);
      background: #0b1220;
      color: var(--ink);
      font-family: inherit;
    }

    .row input:disabled {
      background: #111a2c;
      color: var(--muted);
    }

    .row button {
      padding: 8px 16px;
      border: none;
      border-radius: 8px;
      color: white;
      cursor: pointer;
      font-size: 0.85rem;
      flex-shrink: 0;
    }

    .row button.save {
      background: var(--accent-deep);
    }

    .row button.complete {
      background: #15803d;
    }

    .row .done {
      color: var(--accent);
      font-size: 0.85rem;
      flex-shrink: 0;
    }

    .status {
      min-height: 1.2em;
      text-align: center;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .status.error {
      color: #f87171;
    }

    .overlay {
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.72);
      backdrop-filter: blur(4px);
      display: none;
      align-items: center;
      justify-content: center;
      padding: 20px;
    }

    .overlay.open {
      display: flex;
    }

    .modal {
      background: var(--bg-2);
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 30px;
      max-width: 540px;
      max-height: 80vh;
      overflow-y: auto;
    }

    .modal h3 {
      margin: 0 0 14px;
    }

    .modal p {
      color: var(--muted);
      font-size: 0.9rem;
      line-height: 1.7;
      margin: 0;
    }

    .modal button {
      margin-top: 20px;
      padding: 9px 24px;
      border: none;
      border-radius: 8px;
      background: var(--accent-deep);
      color: white;
      cursor: pointer;
    }
  </style>
</head>
<body>
  <audio id="bell" src="https://actions.google.com/sounds/v1/alarms/digital_watch_alarm_long.ogg"></audio>

  <nav>
    <h1>Serious Study Series</h1>
    <div>
      <button id="help-btn" type="button">Help</button>
      <button id="about-btn" type="button">About</button>
    </div>
  </nav>

  <main>
    <div class="masthead">
      <h2>SERIOUS STUDY SERIES</h2>
      <p class="today">Today: {{DATE}}</p>
    </div>

    <div class="cards">
      <div class="card">
        <p class="label">Overall Progress</p>
        <div class="bar"><div class="fill" id="progress-fill"></div></div>
        <p class="value" id="progress-text">0% completed</p>
      </div>
      <div class="card">
        <p class="label">Daily Streak</p>
        <p class="value">&#128293; <span id="streak-text">0</span> days</p>
      </div>
    </div>

    <div class="card pomodoro">
      <p class="label">Pomodoro</p>
      <div class="clock" id="timer-display">30:00</div>
      <div class="presets" id="presets">
        <button type="button" data-minutes="30">30 min</button>
        <button type="button" data-minutes="45">45 min</button>
        <button type="button" data-minutes="60">60 min</button>
        <button type="button" data-minutes="90">90 min</button>
      </div>
      <div class="controls">
        <button type="button" class="primary" id="timer-start">Start</button>
        <button type="button" id="timer-pause">Pause</button>
      </div>
    </div>

    <div class="card planner">
      <h3>Daily Planner &ndash; {{MONTH}}</h3>
      <div id="rows"></div>
    </div>

    <p class="status" id="status"></p>
  </main>

  <div class="overlay" id="overlay">
    <div class="modal">
      <div id="help-body" hidden>
        <h3>Help</h3>
        <p>
          &bull; Plan tasks for the entire month anytime<br />
          &bull; Saving a task locks it permanently<br />
          &bull; Only today&rsquo;s task can be completed<br />
          &bull; Progress and streaks are automatic<br />
          &bull; This system is designed to prevent cheating
        </p>
      </div>
      <div id="about-body" hidden>
        <h3>About</h3>
        <p>
          Serious Study Series is a discipline-first study system
          for accountable and consistent exam preparation.
        </p>
      </div>
      <div id="congrats-body" hidden>
        <h3>&#127881; Congratulations</h3>
        <p>You completed today&rsquo;s task. Stay consistent.</p>
      </div>
      <button type="button" id="modal-close">Close</button>
    </div>
  </div>

  <script>
    const statusEl = document.getElementById('status');
    const rowsEl = document.getElementById('rows');
    const overlay = document.getElementById('overlay');
    const modalBodies = {
      help: document.getElementById('help-body'),
      about: document.getElementById('about-body'),
      congrats: document.getElementById('congrats-body'),
    };
    const bell = document.getElementById('bell');

    let planner = null;
    let congratsOpen = false;

    const setStatus = (text, kind) => {
      statusEl.textContent = text;
      statusEl.className = 'status' + (kind === 'error' ? ' error' : '');
    };

    const openModal = (name) => {
      Object.entries(modalBodies).forEach(([key, el]) => {
        el.hidden = key !== name;
      });
      overlay.classList.add('open');
    };

    const closeModal = async () => {
      overlay.classList.remove('open');
      if (congratsOpen) {
        congratsOpen = false;
        await api('/api/congrats/dismiss', {});
      }
    };

    const api = async (path, body) => {
      const res = await fetch(path, body === undefined ? undefined : {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });
      if (!res.ok) {
        throw new Error(await res.text() || 'Request failed');
      }
      return res.json();
    };

    const applyPlanner = (next) => {
      planner = next;
      document.getElementById('progress-fill').style.width = planner.progress + '%';
      document.getElementById('progress-text').textContent = planner.progress + '% completed';
      document.getElementById('streak-text').textContent = planner.streak;
      renderRows();

      if (planner.storage_warning) {
        setStatus(planner.storage_warning, 'error');
      }
      if (planner.congrats && !congratsOpen) {
        congratsOpen = true;
        openModal('congrats');
      }
    };

    const renderRows = () => {
      const byDay = {};
      planner.tasks.forEach((task) => { byDay[task.day] = task; });
      rowsEl.replaceChildren();

      for (let d = 1; d <= planner.days_in_month; d++) {
        const task = byDay[d] || { text: '', saved: false, done: false };
        const row = document.createElement('div');
        row.className = 'row' + (d === planner.day ? ' today' : '');

        const num = document.createElement('div');
        num.className = 'daynum';
        num.textContent = 'Day ' + d;
        row.appendChild(num);

        const input = document.createElement('input');
        input.value = task.text;
        input.disabled = task.saved;
        input.placeholder = 'Write task...';
        input.addEventListener('change', () => {
          send('/api/task/text', { day: d, text: input.value });
        });
        row.appendChild(input);

        if (!task.saved) {
          const save = document.createElement('button');
          save.className = 'save';
          save.textContent = 'Save';
          save.addEventListener('click', async () => {
            if (input.value !== task.text) {
              await send('/api/task/text', { day: d, text: input.value });
            }
            send('/api/task/save', { day: d });
          });
          row.appendChild(save);
        }

        if (task.saved && !task.done && d === planner.day) {
          const complete = document.createElement('button');
          complete.className = 'complete';
          complete.textContent = 'Complete';
          complete.addEventListener('click', () => {
            send('/api/task/complete', { day: d });
          });
          row.appendChild(complete);
        }

        if (task.done) {
          const done = document.createElement('span');
          done.className = 'done';
          done.textContent = '✔ Done';
          row.appendChild(done);
        }

        rowsEl.appendChild(row);
      }
    };

    const send = async (path, body) => {
      try {
        setStatus('Saving...', 'info');
        applyPlanner(await api(path, body));
        setStatus('Saved', 'ok');
        setTimeout(() => setStatus('', ''), 1200);
      } catch (err) {
        setStatus(err.message, 'error');
      }
    };

    const refreshTimer = async () => {
      const timer = await api('/api/timer');
      document.getElementById('timer-display').textContent = timer.display;
      if (timer.expired) {
        bell.play().catch(() => {});
        await api('/api/timer/ack', {});
      }
    };

    document.getElementById('presets').addEventListener('click', (event) => {
      const minutes = event.target.dataset && event.target.dataset.minutes;
      if (!minutes) return;
      api('/api/timer/duration', { minutes: Number(minutes) })
        .then(refreshTimer)
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('timer-start').addEventListener('click', () => {
      api('/api/timer/start', {}).then(refreshTimer).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('timer-pause').addEventListener('click', () => {
      api('/api/timer/pause', {}).then(refreshTimer).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('help-btn').addEventListener('click', () => openModal('help'));
    document.getElementById('about-btn').addEventListener('click', () => openModal('about'));
    document.getElementById('modal-close').addEventListener('click', () => {
      closeModal().catch((err) => setStatus(err.message, 'error'));
    });

    api('/api/planner').then(applyPlanner).catch((err) => setStatus(err.message, 'error'));
    refreshTimer().catch(() => {});
    setInterval(() => refreshTimer().catch(() => {}), 1000);
  </script>
</body>
</html>
"#;
